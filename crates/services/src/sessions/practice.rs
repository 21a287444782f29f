use zoo_core::model::{Animal, AttemptEvaluation, AttemptOutcome, SessionPhase};

use crate::error::SessionError;
use super::controller::SessionController;

/// Free practice over a single animal card.
///
/// Everything is manual: the learner presses play and speak as often as
/// they like. No attempt cap, no auto-advance, and the skip word is never
/// armed.
pub struct PracticeSession {
    controller: SessionController,
    animal: Animal,
}

impl PracticeSession {
    pub(crate) fn new(controller: SessionController, animal: Animal) -> Self {
        Self { controller, animal }
    }

    #[must_use]
    pub fn animal(&self) -> &Animal {
        &self.animal
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.controller.attempt_count()
    }

    #[must_use]
    pub fn last_result(&self) -> Option<AttemptOutcome> {
        self.controller.last_result()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    #[must_use]
    pub fn monitor(&self) -> super::controller::SessionMonitor {
        self.controller.monitor()
    }

    #[must_use]
    pub fn sample_progress(&self) -> f32 {
        self.controller.sample_progress()
    }

    /// Announce and play the animal's clip once.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if another session took over.
    pub async fn play(&mut self) -> Result<(), SessionError> {
        let animal = self.animal.clone();
        self.controller.announce(&animal).await?;
        self.controller.play(&animal).await
    }

    /// One voluntary recognition attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if another session took over.
    pub async fn listen(&mut self) -> Result<AttemptEvaluation, SessionError> {
        let animal = self.animal.clone();
        self.controller.request_attempt(&animal, false).await
    }

    /// Halt playback/recognition and retire this session.
    pub fn stop(&self) {
        self.controller.halt();
    }
}
