use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the source module.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The input directory cannot be listed. Fatal for the whole run.
    #[error("Erreur de lecture du dossier {} : {source}", path.display())]
    DirectoryRead {
        /// Directory that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened or decoded as a supported image.
    #[error("Impossible de charger {} : {source}", path.display())]
    ImageDecode {
        /// Offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: ::image::ImageError,
    },
}

impl SourceError {
    /// Whether the batch can continue past this error.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::ImageDecode { .. })
    }
}
