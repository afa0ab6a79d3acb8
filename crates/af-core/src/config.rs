use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::frame::CellScale;

/// Répertoire d'entrée par défaut.
pub const DEFAULT_INPUT_DIR: &str = "src/pics";

/// Configuration de lecture, passée explicitement au pilote et au rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use af_core::config::PlaybackConfig;
/// let config = PlaybackConfig::default();
/// assert_eq!(config.frame_rate, 30);
/// assert_eq!(config.frame_delay().as_millis(), 33);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PlaybackConfig {
    /// Dossier contenant les images, lu sans récursion.
    pub input_dir: PathBuf,
    /// Frames par seconde. Ne contrôle que le délai entre deux lancements.
    pub frame_rate: u32,
    /// Taille de police ; les deux facteurs d'échelle valent `font_size`.
    pub font_size: u32,
    /// Ordre d'écriture des frames.
    pub frame_order: FrameOrder,
}

/// Order in which rendered frames reach the output.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum FrameOrder {
    /// Strict submission order; early finishers wait for their predecessors.
    #[default]
    Submission,
    /// Whichever render finishes first is printed first.
    Completion,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            frame_rate: 30,
            font_size: 1,
            frame_order: FrameOrder::Submission,
        }
    }
}

impl PlaybackConfig {
    /// Reject values playback cannot run with.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] on a zero frame rate or font size.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.frame_rate == 0 {
            return Err(CoreError::Config("frame_rate doit être > 0".into()));
        }
        if self.font_size == 0 {
            return Err(CoreError::Config("font_size doit être > 0".into()));
        }
        Ok(())
    }

    /// Délai entre deux lancements de rendu : `1s / frame_rate`.
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Cell size derived from the font size.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidScale`] if `font_size` is zero.
    pub fn scale(&self) -> Result<CellScale, CoreError> {
        CellScale::new(self.font_size, self.font_size)
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    playback: Option<PlaybackSection>,
}

#[derive(Deserialize)]
struct PlaybackSection {
    input_dir: Option<PathBuf>,
    frame_rate: Option<u32>,
    font_size: Option<u32>,
    frame_order: Option<FrameOrder>,
}

/// Charge un fichier TOML et le fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// values rejected by [`PlaybackConfig::validate`].
pub fn load_config(path: &Path) -> Result<PlaybackConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide dans {}", path.display()))
}

/// Parse TOML text into a config merged over the defaults.
///
/// # Errors
/// Returns an error on malformed TOML or invalid values.
///
/// # Example
/// ```
/// use af_core::config::{parse_config, FrameOrder};
/// let config = parse_config("[playback]\nframe_rate = 12\nframe_order = \"Completion\"").unwrap();
/// assert_eq!(config.frame_rate, 12);
/// assert_eq!(config.frame_order, FrameOrder::Completion);
/// assert_eq!(config.font_size, 1);
/// ```
pub fn parse_config(content: &str) -> Result<PlaybackConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = PlaybackConfig::default();
    if let Some(p) = file.playback {
        if let Some(v) = p.input_dir {
            config.input_dir = v;
        }
        if let Some(v) = p.frame_rate {
            config.frame_rate = v;
        }
        if let Some(v) = p.font_size {
            config.font_size = v;
        }
        if let Some(v) = p.frame_order {
            config.frame_order = v;
        }
    }

    config.validate()?;
    log::debug!("Config chargée : {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, PlaybackConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse_config("[playback]\ninput_dir = \"frames\"\nfont_size = 3").unwrap();
        assert_eq!(config.input_dir, PathBuf::from("frames"));
        assert_eq!(config.font_size, 3);
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.frame_order, FrameOrder::Submission);
    }

    #[test]
    fn zero_frame_rate_rejected() {
        assert!(parse_config("[playback]\nframe_rate = 0").is_err());
    }

    #[test]
    fn zero_font_size_rejected() {
        let config = PlaybackConfig {
            font_size: 0,
            ..PlaybackConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.scale().is_err());
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(parse_config("[playback\nframe_rate = ").is_err());
    }

    #[test]
    fn frame_delay_is_inverse_of_rate() {
        let config = PlaybackConfig {
            frame_rate: 4,
            ..PlaybackConfig::default()
        };
        assert_eq!(config.frame_delay(), Duration::from_millis(250));
    }

    #[test]
    fn scale_follows_font_size() {
        let config = PlaybackConfig {
            font_size: 2,
            ..PlaybackConfig::default()
        };
        let scale = config.scale().unwrap();
        assert_eq!((scale.x(), scale.y()), (2, 2));
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picflip.toml");
        std::fs::write(&path, "[playback]\nframe_rate = 60\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.frame_rate, 60);
    }

    #[test]
    fn load_config_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
