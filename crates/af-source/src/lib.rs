/// Image sources for picflip: directory scanning and still-image decoding.

pub mod error;
pub mod folder;
pub mod image;

pub use error::SourceError;
