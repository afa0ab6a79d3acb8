/// ASCII conversion engine for picflip.
///
/// Converts decoded pixel frames to newline-delimited ASCII text.
pub mod luminance;
pub mod renderer;

pub use luminance::{Cell, average_luminance};
pub use renderer::render_frame;
