use services::{SessionError, SessionFactory, SessionMonitor, SlideshowSession};
use zoo_core::model::Roster;

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideVm {
    pub name: String,
    pub emoji: String,
    pub sound: String,
    pub index: usize,
    pub total: usize,
}

/// Everything the tour panel renders for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideshowViewState {
    pub current: Option<SlideVm>,
    pub finished: bool,
    pub can_replay: bool,
}

/// Owns a running guided tour and narrates it to the view.
pub struct SlideshowVm {
    slideshow: SlideshowSession,
}

impl SlideshowVm {
    /// # Errors
    ///
    /// Returns `ViewError::EmptyRoster` when there is nothing to show.
    pub fn start(factory: &SessionFactory, roster: &Roster) -> Result<Self, ViewError> {
        let slideshow = factory.slideshow(roster).map_err(|err| match err {
            SessionError::Empty => ViewError::EmptyRoster,
            _ => ViewError::Unknown,
        })?;
        Ok(Self { slideshow })
    }

    #[must_use]
    pub fn monitor(&self) -> SessionMonitor {
        self.slideshow.monitor()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.slideshow.is_finished()
    }

    #[must_use]
    pub fn view_state(&self) -> SlideshowViewState {
        let current = self.slideshow.current_animal().map(|animal| SlideVm {
            name: animal.name().to_owned(),
            emoji: animal.emoji().to_owned(),
            sound: animal.sound().to_owned(),
            index: self.slideshow.current_index(),
            total: self.slideshow.len(),
        });
        SlideshowViewState {
            current,
            finished: self.slideshow.is_finished(),
            can_replay: self.slideshow.can_replay(),
        }
    }

    /// Play the current animal and advance past it. Returns `false` once
    /// the traversal is over.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Stopped` when another session took the channel.
    pub async fn step(&mut self) -> Result<bool, ViewError> {
        if self.slideshow.is_finished() {
            return Ok(false);
        }
        self.slideshow.play_current().await.map_err(map_stop)?;
        let next = self.slideshow.advance().await.map_err(map_stop)?;
        Ok(next.is_some())
    }

    /// Play the current animal again; gated until playback has finished.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Stopped` if the session was superseded; the
    /// not-ready case surfaces as `ViewError::Unknown` and is prevented by
    /// disabling the button.
    pub async fn replay(&mut self) -> Result<(), ViewError> {
        self.slideshow.replay().await.map_err(map_stop)
    }

    pub fn stop(&self) {
        self.slideshow.stop();
    }
}

fn map_stop(err: SessionError) -> ViewError {
    match err {
        SessionError::Superseded => ViewError::Stopped,
        _ => ViewError::Unknown,
    }
}
