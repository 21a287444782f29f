use tracing::debug;

use zoo_core::model::{Animal, SessionPhase};

use crate::error::SessionError;
use super::controller::SessionController;

/// Guided training slideshow: announce and play every animal in order,
/// pausing between items. No recognition step.
///
/// Replay is gated until the current clip has fully finished, matching the
/// replay affordance the card exposes.
#[derive(Debug)]
pub struct SlideshowSession {
    controller: SessionController,
    animals: Vec<Animal>,
    current: usize,
    finished: bool,
}

impl SlideshowSession {
    pub(crate) fn new(controller: SessionController, animals: Vec<Animal>) -> Self {
        Self {
            controller,
            animals,
            current: 0,
            finished: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_animal(&self) -> Option<&Animal> {
        if self.finished {
            None
        } else {
            self.animals.get(self.current)
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.controller.phase()
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

    /// Replay becomes available once playback has fully finished.
    #[must_use]
    pub fn can_replay(&self) -> bool {
        self.controller.phase() == SessionPhase::Evaluated
    }

    /// Announce and play the current animal to the end of its clip.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the traversal is done and
    /// `SessionError::Superseded` if another session took over.
    pub async fn play_current(&mut self) -> Result<(), SessionError> {
        let Some(animal) = self.current_animal().cloned() else {
            return Err(SessionError::Finished);
        };
        self.controller.announce(&animal).await?;
        self.controller.play(&animal).await
    }

    /// Play the current animal again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ReplayNotReady` while the clip is still
    /// playing (the affordance is gated), otherwise as `play_current`.
    pub async fn replay(&mut self) -> Result<(), SessionError> {
        if !self.can_replay() {
            return Err(SessionError::ReplayNotReady);
        }
        self.play_current().await
    }

    /// Wait the inter-item pause, then move to the next animal.
    ///
    /// Returns the next index, or `None` when the traversal is complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if the session lost ownership
    /// while pausing; no state is mutated in that case.
    pub async fn advance(&mut self) -> Result<Option<usize>, SessionError> {
        self.controller.guard().ensure_current()?;
        tokio::time::sleep(self.controller.settings().inter_item_pause()).await;
        self.controller.guard().ensure_current()?;

        self.controller.reset_cycle();
        if self.current + 1 < self.animals.len() {
            self.current += 1;
            debug!(index = self.current, "slideshow advanced");
            Ok(Some(self.current))
        } else {
            self.finished = true;
            debug!("slideshow finished");
            Ok(None)
        }
    }

    /// Drive the whole traversal: play, pause, advance, repeat.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if stopped mid-run.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        while !self.finished {
            self.play_current().await?;
            self.advance().await?;
        }
        Ok(())
    }

    /// Synchronously halt audio and retire this session; pending pauses and
    /// completions mutate nothing afterwards.
    pub fn stop(&self) {
        self.controller.halt();
    }
}
