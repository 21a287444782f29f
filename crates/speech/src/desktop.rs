//! Desktop capability adapters.
//!
//! Announcements go through the operating system's speech command, clip
//! playback through a dedicated rodio thread, and recognition is reported
//! as unsupported until a real engine is wired in. `detect` builds the
//! stack once at startup so no call site ever feature-checks the platform.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use zoo_core::model::ClipRef;
use zoo_core::progress::PlaybackPosition;

use crate::capability::{
    AnnounceError, ClipPlayer, PlaybackError, RecognitionError, RecognizerConfig, SpeechAnnouncer,
    SpeechStack, VoiceRecognizer,
};

//
// ─── DETECTION ─────────────────────────────────────────────────────────────────
//

/// Build the desktop speech stack, selecting unsupported variants where the
/// platform comes up short.
#[must_use]
pub fn detect() -> SpeechStack {
    let announcer: Arc<dyn SpeechAnnouncer> = match CommandAnnouncer::detect() {
        Some(announcer) => Arc::new(announcer),
        None => {
            warn!("no speech command found on PATH; announcements will be silent");
            Arc::new(SilentAnnouncer)
        }
    };
    let player: Arc<dyn ClipPlayer> = Arc::new(RodioPlayer::spawn());
    let recognizer: Arc<dyn VoiceRecognizer> = Arc::new(UnsupportedRecognizer);

    SpeechStack::new(announcer, player, recognizer)
}

fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

//
// ─── ANNOUNCER ─────────────────────────────────────────────────────────────────
//

/// Words-per-minute the speech command uses at rate 1.0.
const BASE_WPM: f32 = 175.0;

/// Speaks through the OS speech command (`say` on macOS, `espeak` elsewhere).
pub struct CommandAnnouncer {
    program: PathBuf,
    rate_flag: &'static str,
}

impl CommandAnnouncer {
    /// Probe PATH for the platform's speech command.
    #[must_use]
    pub fn detect() -> Option<Self> {
        let (binary, rate_flag) = if cfg!(target_os = "macos") {
            ("say", "-r")
        } else {
            ("espeak", "-s")
        };
        find_in_path(binary).map(|program| Self { program, rate_flag })
    }

    fn wpm(rate: f32) -> u32 {
        let wpm = BASE_WPM * rate;
        wpm.round().clamp(80.0, 400.0) as u32
    }
}

#[async_trait]
impl SpeechAnnouncer for CommandAnnouncer {
    async fn speak(&self, text: &str, rate: f32) -> Result<(), AnnounceError> {
        debug!(%rate, "announcing: {text}");
        let output = tokio::process::Command::new(&self.program)
            .arg(self.rate_flag)
            .arg(Self::wpm(rate).to_string())
            .arg(text)
            .output()
            .await
            .map_err(|err| AnnounceError::Failed(err.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(AnnounceError::Failed(format!(
                "speech command exited with {}",
                output.status
            )))
        }
    }
}

/// Unsupported variant: resolves immediately so sequencing still works.
pub struct SilentAnnouncer;

#[async_trait]
impl SpeechAnnouncer for SilentAnnouncer {
    async fn speak(&self, text: &str, _rate: f32) -> Result<(), AnnounceError> {
        debug!("announcement dropped (no synthesis): {text}");
        Ok(())
    }

    fn is_supported(&self) -> bool {
        false
    }
}

//
// ─── CLIP PLAYER ───────────────────────────────────────────────────────────────
//

/// How often the playback thread refreshes position and checks for commands.
const PLAYBACK_POLL: Duration = Duration::from_millis(50);

enum PlayerCmd {
    Play(PathBuf, oneshot::Sender<Result<(), PlaybackError>>),
    Stop,
    Shutdown,
}

/// Clip playback on a dedicated thread behind a command channel.
///
/// The rodio output stream is not `Send`, so it lives on the playback
/// thread for the player's whole lifetime; callers only ever touch the
/// channel and the shared position cell.
pub struct RodioPlayer {
    tx: Sender<PlayerCmd>,
    position: Arc<Mutex<Option<PlaybackPosition>>>,
}

impl RodioPlayer {
    /// Start the playback thread. The audio device is opened lazily on the
    /// first play so a headless machine can still construct the stack.
    #[must_use]
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        let position = Arc::new(Mutex::new(None));
        let thread_position = Arc::clone(&position);
        thread::Builder::new()
            .name("clip-playback".to_owned())
            .spawn(move || playback_thread(rx, thread_position))
            .expect("spawn playback thread");

        Self { tx, position }
    }

    fn clip_path(clip: &ClipRef) -> Result<&Path, PlaybackError> {
        clip.as_path().ok_or_else(|| {
            PlaybackError::ClipUnreadable("remote clips are not supported".to_owned())
        })
    }
}

#[async_trait]
impl ClipPlayer for RodioPlayer {
    async fn play(&self, clip: &ClipRef) -> Result<(), PlaybackError> {
        let path = Self::clip_path(clip)?.to_path_buf();
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(PlayerCmd::Play(path, done_tx))
            .map_err(|_| PlaybackError::Device("playback thread gone".to_owned()))?;
        done_rx
            .await
            .map_err(|_| PlaybackError::Device("playback thread gone".to_owned()))?
    }

    fn clip_duration(&self, clip: &ClipRef) -> Option<Duration> {
        let path = clip.as_path()?;
        let file = File::open(path).ok()?;
        let source = Decoder::new(BufReader::new(file)).ok()?;
        source.total_duration()
    }

    fn playback_position(&self) -> Option<PlaybackPosition> {
        *self.position.lock().expect("position lock")
    }

    fn stop(&self) {
        let _ = self.tx.send(PlayerCmd::Stop);
        *self.position.lock().expect("position lock") = None;
    }
}

impl Drop for RodioPlayer {
    fn drop(&mut self) {
        let _ = self.tx.send(PlayerCmd::Shutdown);
    }
}

fn playback_thread(rx: Receiver<PlayerCmd>, position: Arc<Mutex<Option<PlaybackPosition>>>) {
    let mut output: Option<(OutputStream, OutputStreamHandle)> = None;

    while let Ok(cmd) = rx.recv() {
        match cmd {
            PlayerCmd::Play(path, done) => {
                let (result, shutdown) = play_one(&mut output, &rx, &position, &path);
                let _ = done.send(result);
                if shutdown {
                    break;
                }
            }
            PlayerCmd::Stop => {}
            PlayerCmd::Shutdown => break,
        }
    }
}

/// Plays a single clip to completion, polling for stop commands.
///
/// Returns the playback result plus whether a shutdown arrived mid-clip.
fn play_one(
    output: &mut Option<(OutputStream, OutputStreamHandle)>,
    rx: &Receiver<PlayerCmd>,
    position: &Arc<Mutex<Option<PlaybackPosition>>>,
    path: &Path,
) -> (Result<(), PlaybackError>, bool) {
    let handle = match ensure_output(output) {
        Ok(handle) => handle,
        Err(err) => return (Err(err), false),
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => return (Err(PlaybackError::ClipUnreadable(err.to_string())), false),
    };
    let source = match Decoder::new(BufReader::new(file)) {
        Ok(source) => source,
        Err(err) => return (Err(PlaybackError::ClipUnreadable(err.to_string())), false),
    };
    let duration = source.total_duration();

    let sink = match Sink::try_new(&handle) {
        Ok(sink) => sink,
        Err(err) => return (Err(PlaybackError::Device(err.to_string())), false),
    };
    sink.append(source);
    debug!("playing clip {}", path.display());

    let mut shutdown = false;
    loop {
        if sink.empty() {
            break;
        }
        if let Some(duration) = duration {
            *position.lock().expect("position lock") = Some(PlaybackPosition {
                position: sink.get_pos(),
                duration,
            });
        }
        match rx.recv_timeout(PLAYBACK_POLL) {
            Ok(PlayerCmd::Stop) => {
                sink.stop();
                break;
            }
            Ok(PlayerCmd::Shutdown) => {
                sink.stop();
                shutdown = true;
                break;
            }
            Ok(PlayerCmd::Play(_, done)) => {
                // The controller never overlaps plays; refuse rather than queue.
                let _ = done.send(Err(PlaybackError::Failed(
                    "a clip is already playing".to_owned(),
                )));
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                sink.stop();
                shutdown = true;
                break;
            }
        }
    }

    *position.lock().expect("position lock") = None;
    (Ok(()), shutdown)
}

fn ensure_output(
    output: &mut Option<(OutputStream, OutputStreamHandle)>,
) -> Result<OutputStreamHandle, PlaybackError> {
    if output.is_none() {
        let pair =
            OutputStream::try_default().map_err(|err| PlaybackError::Device(err.to_string()))?;
        *output = Some(pair);
    }
    Ok(output.as_ref().expect("output opened").1.clone())
}

//
// ─── RECOGNIZER ────────────────────────────────────────────────────────────────
//

/// The platform ships no speech-to-text engine; every listen resolves as
/// unsupported and the controller turns that into a spoken retry prompt.
pub struct UnsupportedRecognizer;

#[async_trait]
impl VoiceRecognizer for UnsupportedRecognizer {
    async fn listen(&self, _config: &RecognizerConfig) -> Result<String, RecognitionError> {
        Err(RecognitionError::Unsupported)
    }

    fn is_supported(&self) -> bool {
        false
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wpm_scales_and_clamps() {
        assert_eq!(CommandAnnouncer::wpm(1.0), 175);
        assert_eq!(CommandAnnouncer::wpm(0.9), 158);
        assert_eq!(CommandAnnouncer::wpm(0.1), 80);
        assert_eq!(CommandAnnouncer::wpm(10.0), 400);
    }

    #[tokio::test]
    async fn unsupported_recognizer_reports_unsupported() {
        let recognizer = UnsupportedRecognizer;
        let config = RecognizerConfig {
            locale: "en-US".to_owned(),
            interim_results: false,
            max_alternatives: 1,
        };
        assert_eq!(
            recognizer.listen(&config).await.unwrap_err(),
            RecognitionError::Unsupported
        );
        assert!(!recognizer.is_supported());
    }

    #[tokio::test]
    async fn remote_clips_are_refused_without_touching_audio() {
        let clip = ClipRef::from_url("https://example.org/lion.mp3").unwrap();
        assert!(RodioPlayer::clip_path(&clip).is_err());
    }
}
