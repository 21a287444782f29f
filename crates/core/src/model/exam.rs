use crate::model::session::AttemptOutcome;

//
// ─── EXAM RECORD ───────────────────────────────────────────────────────────────
//

/// One answered exam question: which animal, and how it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamRecord {
    pub animal_name: String,
    pub outcome: AttemptOutcome,
}

impl ExamRecord {
    #[must_use]
    pub fn new(animal_name: impl Into<String>, outcome: AttemptOutcome) -> Self {
        Self {
            animal_name: animal_name.into(),
            outcome,
        }
    }
}

//
// ─── EXAM RESULTS ──────────────────────────────────────────────────────────────
//

/// Ordered, append-only record of one exam run.
///
/// Grows by exactly one record per question; cleared only on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamResults {
    records: Vec<ExamRecord>,
}

impl ExamResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ExamRecord) {
        self.records.push(record);
    }

    /// Number of successful answers so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.outcome == AttemptOutcome::Success)
            .count()
    }

    #[must_use]
    pub fn records(&self) -> &[ExamRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop everything; used only by explicit restart.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_counts_only_successes() {
        let mut results = ExamResults::new();
        results.push(ExamRecord::new("Lion", AttemptOutcome::Success));
        results.push(ExamRecord::new("Cow", AttemptOutcome::Retry));
        results.push(ExamRecord::new("Cat", AttemptOutcome::Success));

        assert_eq!(results.score(), 2);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn clear_resets_to_initial() {
        let mut results = ExamResults::new();
        results.push(ExamRecord::new("Lion", AttemptOutcome::Retry));
        results.clear();

        assert!(results.is_empty());
        assert_eq!(results.score(), 0);
    }
}
