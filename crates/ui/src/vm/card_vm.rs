use std::sync::Arc;

use services::{PracticeSession, SessionFactory, SessionMonitor};
use zoo_core::model::{Animal, AttemptEvaluation, SessionPhase};

/// Visual feedback after a practice attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFeedback {
    Success,
    Retry,
}

/// One free-practice animal card.
///
/// The practice session is created lazily on first interaction so an idle
/// card never claims the shared audio/mic channel; pressing play on another
/// card supersedes this one, and the next press here quietly starts over.
pub struct CardVm {
    factory: Arc<SessionFactory>,
    animal: Animal,
    session: Option<PracticeSession>,
    feedback: Option<CardFeedback>,
}

impl CardVm {
    #[must_use]
    pub fn new(factory: Arc<SessionFactory>, animal: Animal) -> Self {
        Self {
            factory,
            animal,
            session: None,
            feedback: None,
        }
    }

    #[must_use]
    pub fn animal(&self) -> &Animal {
        &self.animal
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map_or(SessionPhase::Idle, PracticeSession::phase)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(
            self.phase(),
            SessionPhase::Announcing | SessionPhase::PlayingAudio
        )
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.phase() == SessionPhase::AwaitingRecognition
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase().is_busy()
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.session
            .as_ref()
            .map_or(0.0, PracticeSession::sample_progress)
    }

    #[must_use]
    pub fn monitor(&self) -> Option<SessionMonitor> {
        self.session.as_ref().map(PracticeSession::monitor)
    }

    #[must_use]
    pub fn feedback(&self) -> Option<CardFeedback> {
        self.feedback
    }

    #[must_use]
    pub fn feedback_text(&self) -> Option<String> {
        self.feedback.map(|feedback| match feedback {
            CardFeedback::Success => format!("⭐ Great job! It's the {}!", self.animal.name()),
            CardFeedback::Retry => "Not quite. Play the sound and try again!".to_owned(),
        })
    }

    /// Ensure the card owns a live session and hand out its monitor, so a
    /// progress ticker can start before the play future is awaited.
    pub fn prepare(&mut self) -> SessionMonitor {
        self.ensure_session().monitor()
    }

    /// Announce and play this animal's clip.
    pub async fn play(&mut self) {
        self.feedback = None;
        let _ = self.ensure_session().play().await;
    }

    /// One voluntary recognition attempt.
    pub async fn listen(&mut self) {
        self.feedback = None;
        match self.ensure_session().listen().await {
            Ok(AttemptEvaluation::Success) => self.feedback = Some(CardFeedback::Success),
            Ok(AttemptEvaluation::Retry | AttemptEvaluation::Skip) => {
                self.feedback = Some(CardFeedback::Retry);
            }
            // Another card took the channel; this card simply goes quiet.
            Err(_) => {}
        }
    }

    pub fn stop(&self) {
        if let Some(session) = &self.session {
            session.stop();
        }
    }

    fn ensure_session(&mut self) -> &mut PracticeSession {
        let stale = self
            .session
            .as_ref()
            .is_none_or(|session| !session.monitor().is_current());
        if stale {
            self.session = Some(self.factory.practice(self.animal.clone()));
        }
        self.session.as_mut().expect("session just ensured")
    }
}
