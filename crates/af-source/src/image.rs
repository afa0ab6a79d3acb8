use std::path::Path;

use af_core::frame::FrameBuffer;
use image::{ImageError, ImageReader};

use crate::error::SourceError;

/// Décode une image fixe depuis le disque.
///
/// The format is guessed from the file content, not its extension. The file
/// handle lives inside the reader and is closed before this returns.
///
/// # Errors
/// Returns [`SourceError::ImageDecode`] if the file cannot be opened, its
/// format is not recognised, or its content is corrupt.
///
/// # Example
/// ```no_run
/// use af_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("src/pics/001.png")).unwrap();
/// println!("{}×{}", frame.width, frame.height);
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer, SourceError> {
    let decoded = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(ImageError::from)
        .and_then(ImageReader::decode)
        .map_err(|source| SourceError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}
