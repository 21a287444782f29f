use std::sync::Arc;

use services::SessionFactory;
use zoo_core::model::Roster;

/// What the composition root must provide to the views.
pub trait UiApp: Send + Sync {
    fn roster(&self) -> Roster;
    fn sessions(&self) -> Arc<SessionFactory>;
}

#[derive(Clone)]
pub struct AppContext {
    roster: Roster,
    sessions: Arc<SessionFactory>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            roster: app.roster(),
            sessions: app.sessions(),
        }
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionFactory> {
        Arc::clone(&self.sessions)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
