use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use zoo_core::model::{ClipRef, SessionSettings};
use zoo_core::progress::PlaybackPosition;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced by announcement adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnnounceError {
    #[error("speech synthesis is not available on this platform")]
    Unavailable,

    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// Errors surfaced by clip playback adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("clip could not be read: {0}")]
    ClipUnreadable(String),

    #[error("audio device error: {0}")]
    Device(String),

    #[error("playback failed: {0}")]
    Failed(String),
}

/// Errors surfaced by recognition adapters.
///
/// Mirrors the platform error codes a speech-recognition engine reports;
/// every variant is absorbed by the session controller as a retry prompt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecognitionError {
    #[error("speech recognition is not supported on this platform")]
    Unsupported,

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no speech detected")]
    NoSpeech,

    #[error("recognition error: {0}")]
    Other(String),
}

//
// ─── RECOGNIZER CONFIG ─────────────────────────────────────────────────────────
//

/// Per-listen parameters handed to the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerConfig {
    pub locale: String,
    pub interim_results: bool,
    pub max_alternatives: u8,
}

impl RecognizerConfig {
    #[must_use]
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self {
            locale: settings.locale().to_owned(),
            interim_results: settings.interim_results(),
            max_alternatives: settings.max_alternatives(),
        }
    }
}

//
// ─── CAPABILITY CONTRACTS ──────────────────────────────────────────────────────
//

/// Converts an instructional string to spoken audio.
#[async_trait]
pub trait SpeechAnnouncer: Send + Sync {
    /// Speak `text` at the given rate multiplier; resolves on completion.
    ///
    /// # Errors
    ///
    /// Returns `AnnounceError` if synthesis is unavailable or fails mid-way.
    async fn speak(&self, text: &str, rate: f32) -> Result<(), AnnounceError>;

    fn is_supported(&self) -> bool {
        true
    }
}

/// Plays a pre-recorded clip.
#[async_trait]
pub trait ClipPlayer: Send + Sync {
    /// Play the clip to its end; resolves on the ended event.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` if the clip cannot be decoded or the output
    /// device fails.
    async fn play(&self, clip: &ClipRef) -> Result<(), PlaybackError>;

    /// Clip length when the adapter can know it up front.
    fn clip_duration(&self, clip: &ClipRef) -> Option<Duration>;

    /// Current position inside the playing clip, when the adapter tracks it.
    fn playback_position(&self) -> Option<PlaybackPosition>;

    /// Synchronously halt playback. Safe to call when idle.
    fn stop(&self);

    fn is_supported(&self) -> bool {
        true
    }
}

/// Listens for one short utterance and returns its transcript.
#[async_trait]
pub trait VoiceRecognizer: Send + Sync {
    /// Listen once; resolves with a transcript or a platform error code.
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError` for every non-transcript outcome,
    /// `RecognitionError::Unsupported` included.
    async fn listen(&self, config: &RecognizerConfig) -> Result<String, RecognitionError>;

    fn is_supported(&self) -> bool;

    /// Discard any in-flight listen. Safe to call when idle.
    fn cancel(&self) {}
}

//
// ─── SPEECH STACK ──────────────────────────────────────────────────────────────
//

/// The trio of capabilities a session controller drives.
///
/// Built once at startup (see `desktop::detect`) and cloned into each
/// session; the controller enforces that only one capability is in flight
/// at a time.
#[derive(Clone)]
pub struct SpeechStack {
    pub announcer: Arc<dyn SpeechAnnouncer>,
    pub player: Arc<dyn ClipPlayer>,
    pub recognizer: Arc<dyn VoiceRecognizer>,
}

impl SpeechStack {
    #[must_use]
    pub fn new(
        announcer: Arc<dyn SpeechAnnouncer>,
        player: Arc<dyn ClipPlayer>,
        recognizer: Arc<dyn VoiceRecognizer>,
    ) -> Self {
        Self {
            announcer,
            player,
            recognizer,
        }
    }
}

impl std::fmt::Debug for SpeechStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechStack")
            .field("announcer_supported", &self.announcer.is_supported())
            .field("player_supported", &self.player.is_supported())
            .field("recognizer_supported", &self.recognizer.is_supported())
            .finish()
    }
}
