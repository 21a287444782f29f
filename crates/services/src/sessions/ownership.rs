use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use zoo_core::model::SessionToken;

use crate::error::SessionError;

//
// ─── REGISTRY ──────────────────────────────────────────────────────────────────
//

/// Decides which session's completions still count.
///
/// The page shares one audio-out and one mic-in channel, so at most one
/// session may drive them. Beginning a session bumps the generation, which
/// silently retires every guard minted before it; a retired guard's owner
/// must not mutate session state again.
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    generation: Arc<AtomicU64>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership for a new session, invalidating all previous guards.
    #[must_use]
    pub fn begin(&self) -> SessionGuard {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        SessionGuard {
            registry: self.clone(),
            generation,
            token: SessionToken::mint(),
        }
    }

    /// Retire every outstanding guard without starting a new session.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Retire one specific generation, if it is still the live one.
    ///
    /// A guard that was already superseded must not disturb whoever owns
    /// the channel now, so this is a compare-and-swap rather than a bump.
    fn retire(&self, generation: u64) {
        let _ = self.generation.compare_exchange(
            generation,
            generation + 1,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

//
// ─── GUARD ─────────────────────────────────────────────────────────────────────
//

/// Proof of session ownership, re-checked after every suspension point.
#[derive(Clone, Debug)]
pub struct SessionGuard {
    registry: SessionRegistry,
    generation: u64,
    token: SessionToken,
}

impl SessionGuard {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.registry.current() == self.generation
    }

    /// # Errors
    ///
    /// Returns `SessionError::Superseded` once a newer session owns the
    /// channel.
    pub fn ensure_current(&self) -> Result<(), SessionError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(SessionError::Superseded)
        }
    }

    /// Retire this guard (and any sibling of the same generation). Has no
    /// effect if a newer session already took over.
    pub fn retire(&self) {
        self.registry.retire(self.generation);
    }

    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.token
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_invalidates_previous_guard() {
        let registry = SessionRegistry::new();
        let first = registry.begin();
        assert!(first.is_current());

        let second = registry.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(first.ensure_current(), Err(SessionError::Superseded));
    }

    #[test]
    fn retire_voids_the_guard_itself() {
        let registry = SessionRegistry::new();
        let guard = registry.begin();
        guard.retire();
        assert!(!guard.is_current());
    }

    #[test]
    fn retiring_a_stale_guard_leaves_the_live_session_alone() {
        let registry = SessionRegistry::new();
        let stale = registry.begin();
        let live = registry.begin();

        stale.retire();

        assert!(live.is_current());
    }

    #[test]
    fn tokens_distinguish_session_instances() {
        let registry = SessionRegistry::new();
        let first = registry.begin();
        let second = registry.begin();
        assert_ne!(first.token(), second.token());
    }
}
