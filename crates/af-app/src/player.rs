use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use af_ascii::renderer::render_frame;
use af_core::charset::LuminanceLut;
use af_core::config::{FrameOrder, PlaybackConfig};
use af_core::error::CoreError;
use af_core::frame::{AsciiFrame, CellScale};
use af_source::SourceError;
use af_source::folder::{LoadedImage, load_folder};
use thiserror::Error;

/// Frame rendue, étiquetée par son rang de soumission.
type Tagged = (usize, AsciiFrame);

/// Errors that stop a playback run.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Directory listing failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration rejected before playback.
    #[error(transparent)]
    Config(#[from] CoreError),

    /// Writing a frame to the output failed.
    #[error("Erreur d'écriture de la sortie : {0}")]
    Output(#[from] io::Error),

    /// The dispatcher thread could not be started.
    #[error("Impossible de lancer le thread de dispatch : {0}")]
    Spawn(#[source] io::Error),
}

/// Bilan d'une lecture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// File entries found in the input directory.
    pub discovered: usize,
    /// Entries skipped because they could not be decoded.
    pub skipped: usize,
    /// Frames written to the output.
    pub rendered: usize,
}

/// Joue le dossier configuré : charge, rend et écrit chaque frame dans `out`.
///
/// One render thread is launched per image, `config.frame_delay()` apart,
/// without waiting for earlier renders. Frames travel through a single
/// rendezvous channel; with [`FrameOrder::Submission`] they are written in
/// file-name order, with [`FrameOrder::Completion`] as they finish. Each
/// frame is written as one contiguous block followed by a flush.
///
/// # Errors
/// Returns [`PlayerError::Source`] if the input directory cannot be read
/// (nothing is written in that case), [`PlayerError::Config`] for an invalid
/// configuration, and [`PlayerError::Output`] if writing to `out` fails.
///
/// # Example
/// ```no_run
/// use af_app::player::play;
/// use af_core::config::PlaybackConfig;
///
/// let report = play(&PlaybackConfig::default(), &mut std::io::stdout().lock()).unwrap();
/// println!("{} frames", report.rendered);
/// ```
pub fn play<W: Write>(config: &PlaybackConfig, out: &mut W) -> Result<PlaybackReport, PlayerError> {
    config.validate()?;
    let scale = config.scale()?;

    let batch = load_folder(&config.input_dir)?;
    let mut report = PlaybackReport {
        discovered: batch.discovered,
        skipped: batch.skipped.len(),
        rendered: 0,
    };

    let (tx, rx) = flume::bounded::<Tagged>(0);
    let dispatcher = spawn_dispatcher(batch.images, tx, scale, config.frame_delay())?;

    let written = match config.frame_order {
        FrameOrder::Submission => write_in_submission_order(&rx, out),
        FrameOrder::Completion => write_as_completed(&rx, out),
    };

    // Sur erreur d'écriture, fermer le canal arrête le dispatch restant.
    drop(rx);
    match dispatcher.join() {
        Ok(launched) => log::debug!("{launched} rendus lancés"),
        Err(_) => log::error!("Le thread de dispatch a paniqué"),
    }

    report.rendered = written?;
    Ok(report)
}

/// Diagnostic à afficher quand le dossier d'entrée est illisible.
///
/// Returns `None` for every other error.
///
/// # Example
/// ```
/// use af_app::player::{PlayerError, directory_diagnostic};
/// use af_core::error::CoreError;
///
/// let err = PlayerError::Config(CoreError::Config("frame_rate".into()));
/// assert!(directory_diagnostic(&err).is_none());
/// ```
#[must_use]
pub fn directory_diagnostic(err: &PlayerError) -> Option<String> {
    match err {
        PlayerError::Source(e @ SourceError::DirectoryRead { .. }) => {
            Some(format!("Error reading directory: {e}"))
        }
        _ => None,
    }
}

/// Lance un thread de rendu par image, espacés de `delay`.
///
/// The dispatcher owns the original sender and joins every worker before
/// exiting, so the channel disconnects only once all renders are done. It
/// stops launching once the receiver is gone and returns the launch count.
fn spawn_dispatcher(
    images: Vec<LoadedImage>,
    tx: flume::Sender<Tagged>,
    scale: CellScale,
    delay: Duration,
) -> Result<JoinHandle<usize>, PlayerError> {
    thread::Builder::new()
        .name("af-dispatch".into())
        .spawn(move || {
            let lut = Arc::new(LuminanceLut::new());
            let total = images.len();
            let mut workers = Vec::with_capacity(total);

            for (index, image) in images.into_iter().enumerate() {
                if index > 0 {
                    thread::sleep(delay);
                }
                if tx.is_disconnected() {
                    log::debug!("Sortie fermée, {} rendus annulés", total - index);
                    break;
                }
                log::debug!("Lancement du rendu #{index} ({})", image.path.display());

                let tx = tx.clone();
                let lut = Arc::clone(&lut);
                let spawned = thread::Builder::new()
                    .name(format!("af-render-{index}"))
                    .spawn(move || {
                        let frame = render_frame(&image.frame, scale, &lut);
                        if tx.send((index, frame)).is_err() {
                            log::debug!("Frame #{index} abandonnée : sortie fermée");
                        }
                    });
                match spawned {
                    Ok(handle) => workers.push(handle),
                    Err(e) => log::error!("Impossible de lancer le rendu #{index} : {e}"),
                }
            }

            drop(tx);
            let launched = workers.len();
            for handle in workers {
                if handle.join().is_err() {
                    log::error!("Un thread de rendu a paniqué");
                }
            }
            launched
        })
        .map_err(PlayerError::Spawn)
}

/// Écrit les frames dans l'ordre de soumission.
///
/// Frames arriving early wait in a buffer until their predecessors are
/// written. Indices that never arrive (failed worker) are passed over once
/// the channel closes.
fn write_in_submission_order<W: Write>(
    rx: &flume::Receiver<Tagged>,
    out: &mut W,
) -> io::Result<usize> {
    let mut pending = BTreeMap::new();
    let mut next = 0usize;
    let mut written = 0usize;

    for (index, frame) in rx.iter() {
        pending.insert(index, frame);
        while let Some(frame) = pending.remove(&next) {
            write_frame(out, &frame)?;
            written += 1;
            next += 1;
        }
    }

    for frame in pending.into_values() {
        write_frame(out, &frame)?;
        written += 1;
    }
    Ok(written)
}

/// Écrit les frames dans l'ordre où elles terminent.
fn write_as_completed<W: Write>(rx: &flume::Receiver<Tagged>, out: &mut W) -> io::Result<usize> {
    let mut written = 0usize;
    for (index, frame) in rx.iter() {
        log::trace!("Frame #{index} reçue");
        write_frame(out, &frame)?;
        written += 1;
    }
    Ok(written)
}

#[inline]
fn write_frame<W: Write>(out: &mut W, frame: &AsciiFrame) -> io::Result<()> {
    out.write_all(frame.as_str().as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::frame::FrameBuffer;
    use std::path::PathBuf;

    fn loaded(index: usize, rgb: (u8, u8, u8), w: u32, h: u32) -> LoadedImage {
        LoadedImage {
            path: PathBuf::from(format!("{index:03}.png")),
            frame: FrameBuffer::filled(w, h, rgb),
        }
    }

    fn run_dispatch(images: Vec<LoadedImage>, order: FrameOrder) -> (String, usize) {
        let (tx, rx) = flume::bounded(0);
        let handle =
            spawn_dispatcher(images, tx, CellScale::UNIT, Duration::from_millis(1)).unwrap();
        let mut out = Vec::new();
        let written = match order {
            FrameOrder::Submission => write_in_submission_order(&rx, &mut out).unwrap(),
            FrameOrder::Completion => write_as_completed(&rx, &mut out).unwrap(),
        };
        handle.join().unwrap();
        (String::from_utf8(out).unwrap(), written)
    }

    #[test]
    fn submission_order_survives_slow_first_frame() {
        let images = vec![
            loaded(0, (255, 255, 255), 300, 300),
            loaded(1, (0, 0, 0), 2, 1),
            loaded(2, (100, 150, 200), 1, 1),
        ];
        let (text, written) = run_dispatch(images, FrameOrder::Submission);
        assert_eq!(written, 3);
        let white_row = format!("{}\n", "@".repeat(300));
        let expected = format!("{}  \n+\n", white_row.repeat(300));
        assert_eq!(text, expected);
    }

    #[test]
    fn completion_order_writes_every_frame_once() {
        let images = vec![
            loaded(0, (255, 255, 255), 40, 40),
            loaded(1, (0, 0, 0), 3, 1),
            loaded(2, (100, 150, 200), 2, 2),
        ];
        let (text, written) = run_dispatch(images, FrameOrder::Completion);
        assert_eq!(written, 3);
        assert_eq!(text.matches('@').count(), 1600);
        assert_eq!(text.matches('+').count(), 4);
        assert_eq!(text.matches(' ').count(), 3);
        assert_eq!(text.lines().count(), 40 + 1 + 2);
    }

    #[test]
    fn dispatch_stops_once_output_is_gone() {
        let images = (0..5).map(|i| loaded(i, (0, 0, 0), 1, 1)).collect();
        let (tx, rx) = flume::bounded::<Tagged>(0);
        drop(rx);
        let handle =
            spawn_dispatcher(images, tx, CellScale::UNIT, Duration::from_millis(1)).unwrap();
        assert_eq!(handle.join().unwrap(), 0);
    }

    #[test]
    fn dispatch_launches_every_image() {
        let images = (0..4).map(|i| loaded(i, (0, 0, 0), 1, 1)).collect();
        let (tx, rx) = flume::unbounded();
        let handle =
            spawn_dispatcher(images, tx, CellScale::UNIT, Duration::from_millis(1)).unwrap();
        assert_eq!(handle.join().unwrap(), 4);
        assert_eq!(rx.iter().count(), 4);
    }

    #[test]
    fn no_images_closes_channel() {
        let (text, written) = run_dispatch(Vec::new(), FrameOrder::Submission);
        assert_eq!(written, 0);
        assert!(text.is_empty());
    }

    #[test]
    fn out_of_order_arrivals_are_reordered() {
        let (tx, rx) = flume::unbounded();
        for index in [2usize, 0, 1] {
            let row = index.to_string();
            tx.send((index, AsciiFrame::from_rows(vec![row], 1))).unwrap();
        }
        drop(tx);
        let mut out = Vec::new();
        assert_eq!(write_in_submission_order(&rx, &mut out).unwrap(), 3);
        assert_eq!(out, b"0\n1\n2\n");
    }

    #[test]
    fn missing_index_does_not_lose_later_frames() {
        let (tx, rx) = flume::unbounded();
        tx.send((2, AsciiFrame::from_rows(vec!["c".into()], 1))).unwrap();
        tx.send((0, AsciiFrame::from_rows(vec!["a".into()], 1))).unwrap();
        drop(tx);
        let mut out = Vec::new();
        assert_eq!(write_in_submission_order(&rx, &mut out).unwrap(), 2);
        assert_eq!(out, b"a\nc\n");
    }
}
