use af_app::cli::Cli;
use af_app::player;
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let config = cli.resolve_config()?;
    log::info!(
        "Lecture de {} à {} fps, échelle {}",
        config.input_dir.display(),
        config.frame_rate,
        config.font_size
    );

    // 4. Jouer
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match player::play(&config, &mut out) {
        Ok(report) => {
            log::info!(
                "{} frames écrites ({} fichiers, {} ignorés)",
                report.rendered,
                report.discovered,
                report.skipped
            );
            Ok(())
        }
        Err(e) => match player::directory_diagnostic(&e) {
            // Dossier illisible : diagnostic, aucune frame, sortie normale.
            Some(diagnostic) => {
                log::error!("{e}");
                eprintln!("{diagnostic}");
                Ok(())
            }
            None => Err(e.into()),
        },
    }
}
