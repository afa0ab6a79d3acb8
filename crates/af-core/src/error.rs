use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Invalid cell scale factors.
    #[error("Échelle de cellule invalide : {x}×{y}")]
    InvalidScale {
        /// Horizontal factor.
        x: u32,
        /// Vertical factor.
        y: u32,
    },
}
