use std::fs;
use std::path::{Path, PathBuf};

use af_core::frame::FrameBuffer;

use crate::error::SourceError;
use crate::image::load_image;

/// Image décodée et son chemin d'origine.
#[derive(Debug)]
pub struct LoadedImage {
    /// File the image was decoded from.
    pub path: PathBuf,
    /// Decoded pixels.
    pub frame: FrameBuffer,
}

/// Résultat du chargement d'un dossier.
#[derive(Debug, Default)]
pub struct FolderBatch {
    /// Images décodées, dans l'ordre des noms de fichier.
    pub images: Vec<LoadedImage>,
    /// Number of file entries examined.
    pub discovered: usize,
    /// Entries that failed to load and were skipped.
    pub skipped: Vec<PathBuf>,
}

/// Liste les fichiers d'un dossier, sans récursion, triés par nom.
///
/// Subdirectories are skipped. Every other entry is returned, whatever its
/// extension; the decoder decides what it can read.
///
/// # Errors
/// Returns [`SourceError::DirectoryRead`] if the directory cannot be listed.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let read_err = |source| SourceError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let is_dir = entry.file_type().map_err(read_err)?.is_dir();
        if !is_dir {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Charge toutes les images d'un dossier.
///
/// Files that cannot be decoded are recorded in [`FolderBatch::skipped`]
/// and never abort the batch.
///
/// # Errors
/// Returns [`SourceError::DirectoryRead`] if the directory cannot be listed.
///
/// # Example
/// ```no_run
/// use af_source::folder::load_folder;
/// use std::path::Path;
/// let batch = load_folder(Path::new("src/pics")).unwrap();
/// println!("{} images, {} ignorées", batch.images.len(), batch.skipped.len());
/// ```
pub fn load_folder(dir: &Path) -> Result<FolderBatch, SourceError> {
    let files = list_files(dir)?;
    let mut batch = FolderBatch {
        discovered: files.len(),
        ..FolderBatch::default()
    };

    for path in files {
        match load_image(&path) {
            Ok(frame) => batch.images.push(LoadedImage { path, frame }),
            Err(e) if e.is_skippable() => {
                log::debug!("Fichier ignoré : {e}");
                batch.skipped.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "{} : {} images chargées, {} ignorées",
        dir.display(),
        batch.images.len(),
        batch.skipped.len()
    );
    Ok(batch)
}
