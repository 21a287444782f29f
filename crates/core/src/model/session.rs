use std::fmt;

use uuid::Uuid;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Sub-state of one learning cycle.
///
/// A cycle walks `Idle → Announcing → PlayingAudio → [AwaitingRecognition] →
/// Evaluated` and returns to `Idle` on retry or when the session advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Announcing,
    PlayingAudio,
    AwaitingRecognition,
    Evaluated,
}

impl SessionPhase {
    /// True while a platform capability is in flight for this phase.
    ///
    /// The UI disables triggering controls whenever this holds.
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            SessionPhase::Announcing
                | SessionPhase::PlayingAudio
                | SessionPhase::AwaitingRecognition
        )
    }
}

//
// ─── ATTEMPT OUTCOMES ──────────────────────────────────────────────────────────
//

/// Result recorded for one answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Retry,
}

/// Result of evaluating a single recognition attempt.
///
/// `Skip` is produced only by the spoken escape word once it is armed;
/// scoring folds it into `Retry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptEvaluation {
    Success,
    Retry,
    Skip,
}

impl AttemptEvaluation {
    /// Collapse the evaluation into the recorded outcome.
    #[must_use]
    pub fn to_outcome(self) -> AttemptOutcome {
        match self {
            AttemptEvaluation::Success => AttemptOutcome::Success,
            AttemptEvaluation::Retry | AttemptEvaluation::Skip => AttemptOutcome::Retry,
        }
    }
}

//
// ─── SESSION TOKEN ─────────────────────────────────────────────────────────────
//

/// Names one live session instance.
///
/// Tokens exist so logs and diagnostics can tell overlapping session
/// lifetimes apart; the ownership *decision* is made by the services-layer
/// generation guard.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    #[must_use]
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.0)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_phases_cover_in_flight_capabilities() {
        assert!(SessionPhase::Announcing.is_busy());
        assert!(SessionPhase::PlayingAudio.is_busy());
        assert!(SessionPhase::AwaitingRecognition.is_busy());
        assert!(!SessionPhase::Idle.is_busy());
        assert!(!SessionPhase::Evaluated.is_busy());
    }

    #[test]
    fn skip_scores_as_retry() {
        assert_eq!(AttemptEvaluation::Skip.to_outcome(), AttemptOutcome::Retry);
        assert_eq!(
            AttemptEvaluation::Success.to_outcome(),
            AttemptOutcome::Success
        );
    }

    #[test]
    fn tokens_are_distinct() {
        assert_ne!(SessionToken::mint(), SessionToken::mint());
    }
}
