use af_core::frame::FrameBuffer;

/// Fenêtre rectangulaire de pixels représentée par un caractère.
///
/// # Example
/// ```
/// use af_ascii::luminance::Cell;
/// let cell = Cell { x: 4, y: 0, width: 2, height: 2 };
/// assert_eq!(cell.width, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Average luminance of the pixels inside `cell`, clipped to the frame.
///
/// Sum of per-pixel BT.709 luminance divided by the pixel count, truncating.
/// A cell with no pixel inside the frame yields 0.
///
/// # Example
/// ```
/// use af_core::frame::FrameBuffer;
/// use af_ascii::luminance::{Cell, average_luminance};
///
/// let frame = FrameBuffer::filled(4, 4, (255, 255, 255));
/// let cell = Cell { x: 2, y: 2, width: 8, height: 8 };
/// assert_eq!(average_luminance(&frame, cell), 255);
/// ```
#[must_use]
pub fn average_luminance(frame: &FrameBuffer, cell: Cell) -> u8 {
    let x_end = cell.x.saturating_add(cell.width).min(frame.width);
    let y_end = cell.y.saturating_add(cell.height).min(frame.height);

    let mut sum = 0u64;
    let mut count = 0u64;
    for py in cell.y..y_end {
        for px in cell.x..x_end {
            sum += u64::from(frame.luminance(px, py));
            count += 1;
        }
    }

    if count == 0 {
        return 0;
    }
    (sum / count) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: u32, y: u32, width: u32, height: u32) -> Cell {
        Cell {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn uniform_frame_matches_pixel_formula() {
        for rgb in [(100, 150, 200), (255, 0, 0), (0, 255, 0), (0, 0, 255), (7, 7, 7)] {
            let frame = FrameBuffer::filled(6, 5, rgb);
            let expected = frame.luminance(0, 0);
            assert_eq!(average_luminance(&frame, cell(0, 0, 1, 1)), expected);
            assert_eq!(average_luminance(&frame, cell(1, 2, 3, 2)), expected);
            assert_eq!(average_luminance(&frame, cell(4, 3, 10, 10)), expected);
        }
    }

    #[test]
    fn uniform_frame_exact_value() {
        let frame = FrameBuffer::filled(3, 3, (100, 150, 200));
        assert_eq!(average_luminance(&frame, cell(0, 0, 3, 3)), 142);
    }

    #[test]
    fn average_truncates() {
        // Left column black, right column white: (0 + 255) / 2 = 127.
        let mut frame = FrameBuffer::filled(2, 1, (0, 0, 0));
        frame.set_pixel(1, 0, (255, 255, 255, 255));
        assert_eq!(average_luminance(&frame, cell(0, 0, 2, 1)), 127);
    }

    #[test]
    fn edge_cell_is_clipped_not_padded() {
        // White 3×1 frame, cell 2 wide starting at x=2: only one pixel inside.
        let frame = FrameBuffer::filled(3, 1, (255, 255, 255));
        assert_eq!(average_luminance(&frame, cell(2, 0, 2, 2)), 255);
    }

    #[test]
    fn cell_outside_frame_yields_zero() {
        let frame = FrameBuffer::filled(4, 4, (255, 255, 255));
        assert_eq!(average_luminance(&frame, cell(4, 0, 2, 2)), 0);
        assert_eq!(average_luminance(&frame, cell(0, 9, 2, 2)), 0);
        assert_eq!(average_luminance(&frame, cell(u32::MAX, u32::MAX, 5, 5)), 0);
    }

    #[test]
    fn zero_sized_cell_yields_zero() {
        let frame = FrameBuffer::filled(4, 4, (255, 255, 255));
        assert_eq!(average_luminance(&frame, cell(1, 1, 0, 3)), 0);
    }
}
