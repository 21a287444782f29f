//! Transcript evaluation: the match test and the spoken escape word.

use crate::model::{AttemptEvaluation, AttemptOutcome};

/// The word a learner says to give up on a question.
pub const SKIP_WORD: &str = "next";

/// Completed attempts required before the skip word is honored.
///
/// Two prior attempts means the skip word arms on the third try.
pub const SKIP_UNLOCK_ATTEMPTS: u32 = 2;

/// Case-insensitive substring containment of `animal_name` in `transcript`.
///
/// Containment rather than equality tolerates extra words: "that's a cow"
/// matches "Cow".
#[must_use]
pub fn match_transcript(transcript: &str, animal_name: &str) -> AttemptOutcome {
    let transcript = transcript.to_lowercase();
    let name = animal_name.to_lowercase();
    if transcript.contains(&name) {
        AttemptOutcome::Success
    } else {
        AttemptOutcome::Retry
    }
}

/// True once enough attempts have completed for the skip word to count.
#[must_use]
pub fn skip_word_armed(prior_attempts: u32) -> bool {
    prior_attempts >= SKIP_UNLOCK_ATTEMPTS
}

/// Evaluate one recognition attempt.
///
/// When `skip_enabled` holds and the transcript contains the skip word, the
/// attempt resolves as `Skip` instead of being matched against the animal
/// name. Everything else goes through the match test.
#[must_use]
pub fn evaluate_attempt(
    transcript: &str,
    animal_name: &str,
    skip_enabled: bool,
) -> AttemptEvaluation {
    if skip_enabled && transcript.to_lowercase().contains(SKIP_WORD) {
        return AttemptEvaluation::Skip;
    }
    match match_transcript(transcript, animal_name) {
        AttemptOutcome::Success => AttemptEvaluation::Success,
        AttemptOutcome::Retry => AttemptEvaluation::Retry,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_matches_with_extra_words() {
        assert_eq!(
            match_transcript("that is a cow", "Cow"),
            AttemptOutcome::Success
        );
        assert_eq!(match_transcript("a pig", "Cow"), AttemptOutcome::Retry);
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(match_transcript("LION!", "lion"), AttemptOutcome::Success);
        assert_eq!(match_transcript("ElePHant", "Elephant"), AttemptOutcome::Success);
    }

    #[test]
    fn skip_word_ignored_until_armed() {
        assert!(!skip_word_armed(0));
        assert!(!skip_word_armed(1));
        assert!(skip_word_armed(2));
        assert!(skip_word_armed(3));
    }

    #[test]
    fn disarmed_skip_word_goes_through_match_test() {
        assert_eq!(
            evaluate_attempt("next", "Cow", false),
            AttemptEvaluation::Retry
        );
    }

    #[test]
    fn armed_skip_word_skips() {
        assert_eq!(
            evaluate_attempt("ok next please", "Cow", true),
            AttemptEvaluation::Skip
        );
    }

    #[test]
    fn armed_skip_still_allows_correct_answers() {
        assert_eq!(
            evaluate_attempt("it's a cow", "Cow", true),
            AttemptEvaluation::Success
        );
    }
}
