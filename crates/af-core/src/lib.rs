/// Configuration, types, and shared structures for picflip.
///
/// This crate contains the pixel buffer, the ASCII ramp, the rendered frame
/// type and the playback configuration shared across the workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;

pub use charset::LuminanceLut;
pub use config::{FrameOrder, PlaybackConfig};
pub use error::CoreError;
pub use frame::{AsciiFrame, CellScale, FrameBuffer};
