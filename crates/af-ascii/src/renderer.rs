use af_core::charset::LuminanceLut;
use af_core::frame::{AsciiFrame, CellScale, FrameBuffer};
use rayon::prelude::*;

use crate::luminance::{Cell, average_luminance};

/// Convertit une image entière en frame ASCII.
///
/// Walks the frame row-major from (0, 0) in `scale`-sized cells up to its
/// bounds; edge cells are clipped. Rows are sampled in parallel and joined
/// in order, so the output is identical to a sequential walk.
///
/// # Example
/// ```
/// use af_core::charset::LuminanceLut;
/// use af_core::frame::{CellScale, FrameBuffer};
/// use af_ascii::renderer::render_frame;
///
/// let frame = FrameBuffer::filled(3, 2, (255, 255, 255));
/// let ascii = render_frame(&frame, CellScale::UNIT, &LuminanceLut::new());
/// assert_eq!(ascii.as_str(), "@@@\n@@@\n");
/// ```
#[must_use]
pub fn render_frame(frame: &FrameBuffer, scale: CellScale, lut: &LuminanceLut) -> AsciiFrame {
    let (sx, sy) = (scale.x(), scale.y());
    let cols = frame.width.div_ceil(sx) as usize;
    let rows = frame.height.div_ceil(sy);

    let lines: Vec<String> = (0..rows)
        .into_par_iter()
        .map(|row| {
            let y = row * sy;
            let mut line = String::with_capacity(cols);
            for col in 0..cols as u32 {
                let cell = Cell {
                    x: col * sx,
                    y,
                    width: sx,
                    height: sy,
                };
                line.push(lut.map_clamped(i32::from(average_luminance(frame, cell))));
            }
            line
        })
        .collect();

    log::trace!(
        "Frame {}×{} rendue en {}×{} cellules",
        frame.width,
        frame.height,
        cols,
        rows
    );
    AsciiFrame::from_rows(lines, cols)
}
