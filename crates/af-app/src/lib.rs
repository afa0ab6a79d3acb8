/// Playback driver and command line for picflip.

pub mod cli;
pub mod player;
