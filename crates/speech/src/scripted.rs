//! Scripted capability fakes for tests and prototyping.
//!
//! Each fake records what it was asked to do and replays whatever the test
//! queued, so a whole exam can run without a speaker or microphone.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use zoo_core::model::ClipRef;
use zoo_core::progress::PlaybackPosition;

use crate::capability::{
    AnnounceError, ClipPlayer, PlaybackError, RecognitionError, RecognizerConfig, SpeechAnnouncer,
    SpeechStack, VoiceRecognizer,
};

//
// ─── ANNOUNCER ─────────────────────────────────────────────────────────────────
//

/// Records every spoken line instead of producing audio.
#[derive(Clone, Default)]
pub struct ScriptedAnnouncer {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAnnouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far, in order.
    #[must_use]
    pub fn spoken_lines(&self) -> Vec<String> {
        self.spoken.lock().expect("announcer lock").clone()
    }
}

#[async_trait]
impl SpeechAnnouncer for ScriptedAnnouncer {
    async fn speak(&self, text: &str, _rate: f32) -> Result<(), AnnounceError> {
        self.spoken
            .lock()
            .expect("announcer lock")
            .push(text.to_owned());
        Ok(())
    }
}

//
// ─── PLAYER ────────────────────────────────────────────────────────────────────
//

/// Completes playback instantly while recording which clips ran.
#[derive(Clone)]
pub struct ScriptedPlayer {
    played: Arc<Mutex<Vec<ClipRef>>>,
    duration: Arc<Mutex<Option<Duration>>>,
    position: Arc<Mutex<Option<PlaybackPosition>>>,
}

impl Default for ScriptedPlayer {
    fn default() -> Self {
        Self {
            played: Arc::new(Mutex::new(Vec::new())),
            duration: Arc::new(Mutex::new(Some(Duration::from_secs(2)))),
            position: Arc::new(Mutex::new(None)),
        }
    }
}

impl ScriptedPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the clip duration reported for every clip (None = unknown).
    pub fn set_clip_duration(&self, duration: Option<Duration>) {
        *self.duration.lock().expect("player lock") = duration;
    }

    /// Script the playback position the next query reports.
    pub fn set_playback_position(&self, position: Option<PlaybackPosition>) {
        *self.position.lock().expect("player lock") = position;
    }

    /// Clips played so far, in order.
    #[must_use]
    pub fn played_clips(&self) -> Vec<ClipRef> {
        self.played.lock().expect("player lock").clone()
    }
}

#[async_trait]
impl ClipPlayer for ScriptedPlayer {
    async fn play(&self, clip: &ClipRef) -> Result<(), PlaybackError> {
        self.played.lock().expect("player lock").push(clip.clone());
        Ok(())
    }

    fn clip_duration(&self, _clip: &ClipRef) -> Option<Duration> {
        *self.duration.lock().expect("player lock")
    }

    fn playback_position(&self) -> Option<PlaybackPosition> {
        *self.position.lock().expect("player lock")
    }

    fn stop(&self) {
        *self.position.lock().expect("player lock") = None;
    }
}

//
// ─── RECOGNIZER ────────────────────────────────────────────────────────────────
//

/// Replays a queue of scripted listen results.
///
/// An exhausted queue reports `NoSpeech`, which is also what a silent
/// microphone would do.
#[derive(Clone, Default)]
pub struct ScriptedRecognizer {
    script: Arc<Mutex<VecDeque<Result<String, RecognitionError>>>>,
    listens: Arc<Mutex<u32>>,
}

impl ScriptedRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_transcript(&self, transcript: impl Into<String>) {
        self.script
            .lock()
            .expect("recognizer lock")
            .push_back(Ok(transcript.into()));
    }

    pub fn push_error(&self, error: RecognitionError) {
        self.script
            .lock()
            .expect("recognizer lock")
            .push_back(Err(error));
    }

    /// How many times `listen` ran.
    #[must_use]
    pub fn listen_count(&self) -> u32 {
        *self.listens.lock().expect("recognizer lock")
    }
}

#[async_trait]
impl VoiceRecognizer for ScriptedRecognizer {
    async fn listen(&self, _config: &RecognizerConfig) -> Result<String, RecognitionError> {
        *self.listens.lock().expect("recognizer lock") += 1;
        self.script
            .lock()
            .expect("recognizer lock")
            .pop_front()
            .unwrap_or(Err(RecognitionError::NoSpeech))
    }

    fn is_supported(&self) -> bool {
        true
    }
}

//
// ─── STACK ─────────────────────────────────────────────────────────────────────
//

/// Handles a test keeps to script and observe the fakes.
#[derive(Clone)]
pub struct ScriptedHandles {
    pub announcer: ScriptedAnnouncer,
    pub player: ScriptedPlayer,
    pub recognizer: ScriptedRecognizer,
}

/// A fully scripted stack plus the handles that drive it.
#[must_use]
pub fn scripted_stack() -> (SpeechStack, ScriptedHandles) {
    let announcer = ScriptedAnnouncer::new();
    let player = ScriptedPlayer::new();
    let recognizer = ScriptedRecognizer::new();
    let stack = SpeechStack::new(
        Arc::new(announcer.clone()),
        Arc::new(player.clone()),
        Arc::new(recognizer.clone()),
    );
    (
        stack,
        ScriptedHandles {
            announcer,
            player,
            recognizer,
        },
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn announcer_records_lines_in_order() {
        let announcer = ScriptedAnnouncer::new();
        announcer.speak("first", 1.0).await.unwrap();
        announcer.speak("second", 1.0).await.unwrap();
        assert_eq!(announcer.spoken_lines(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn player_records_clips_and_reports_scripted_duration() {
        let player = ScriptedPlayer::new();
        let clip = ClipRef::from_file("cow.mp3").unwrap();

        player.play(&clip).await.unwrap();
        assert_eq!(player.played_clips(), vec![clip.clone()]);
        assert_eq!(player.clip_duration(&clip), Some(Duration::from_secs(2)));

        player.set_clip_duration(None);
        assert_eq!(player.clip_duration(&clip), None);
    }

    #[tokio::test]
    async fn recognizer_replays_script_then_reports_no_speech() {
        let recognizer = ScriptedRecognizer::new();
        recognizer.push_transcript("a cow");
        recognizer.push_error(RecognitionError::PermissionDenied);

        let config = RecognizerConfig {
            locale: "en-US".to_owned(),
            interim_results: false,
            max_alternatives: 1,
        };

        assert_eq!(recognizer.listen(&config).await.unwrap(), "a cow");
        assert_eq!(
            recognizer.listen(&config).await.unwrap_err(),
            RecognitionError::PermissionDenied
        );
        assert_eq!(
            recognizer.listen(&config).await.unwrap_err(),
            RecognitionError::NoSpeech
        );
        assert_eq!(recognizer.listen_count(), 3);
    }
}
