use std::path::PathBuf;

use af_core::config::{FrameOrder, PlaybackConfig};
use anyhow::Result;
use clap::{Parser, ValueEnum};

/// picflip — joue un dossier d'images fixes comme une animation ASCII.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dossier d'images à jouer (défaut : celui de la config, sinon src/pics).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Frames par seconde (délai entre deux lancements de rendu).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Pixels par caractère, horizontalement et verticalement.
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Ordre d'écriture des frames.
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Command-line spelling of [`FrameOrder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Ordre des noms de fichier.
    Submission,
    /// Ordre de fin de rendu.
    Completion,
}

impl From<OrderArg> for FrameOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Submission => FrameOrder::Submission,
            OrderArg::Completion => FrameOrder::Completion,
        }
    }
}

impl Cli {
    /// Load the config file (or defaults when absent) and apply CLI overrides.
    ///
    /// # Errors
    /// Returns an error if an existing config file is unreadable or invalid,
    /// or if the overrides produce an invalid configuration.
    pub fn resolve_config(&self) -> Result<PlaybackConfig> {
        let mut config = if self.config.exists() {
            log::info!("Config chargée depuis {}", self.config.display());
            af_core::config::load_config(&self.config)?
        } else {
            log::warn!(
                "Config introuvable : {}. Utilisation des défauts.",
                self.config.display()
            );
            PlaybackConfig::default()
        };

        if let Some(ref dir) = self.dir {
            config.input_dir.clone_from(dir);
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(order) = self.order {
            config.frame_order = order.into();
        }

        config.validate()?;
        Ok(config)
    }
}
