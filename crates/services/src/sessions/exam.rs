use tracing::debug;

use zoo_core::matching::skip_word_armed;
use zoo_core::model::{
    Animal, AttemptEvaluation, AttemptOutcome, ExamRecord, ExamResults, SessionPhase,
};

use crate::error::SessionError;
use super::controller::SessionController;

/// What happened after an exam question was answered and the advance delay
/// elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamStep {
    NextQuestion(usize),
    Finished,
}

/// Scored oral exam across the roster.
///
/// Recognition is required; a question auto-retries up to the attempt cap,
/// the spoken escape word arms on the third attempt, and each answered
/// question appends exactly one record. Finished is terminal until restart.
pub struct ExamSession {
    controller: SessionController,
    animals: Vec<Animal>,
    current: usize,
    results: ExamResults,
    finished: bool,
}

impl ExamSession {
    pub(crate) fn new(controller: SessionController, animals: Vec<Animal>) -> Self {
        Self {
            controller,
            animals,
            current: 0,
            results: ExamResults::new(),
            finished: false,
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.animals.len()
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
    pub fn score(&self) -> usize {
        self.results.score()
    }

    #[must_use]
    pub fn results(&self) -> &ExamResults {
        &self.results
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
    pub fn attempt_count(&self) -> u32 {
        self.controller.attempt_count()
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

    /// Ask the current question to its conclusion: announce, play, listen,
    /// and auto-retry until success, skip, or the attempt cap.
    ///
    /// Appends exactly one result record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the last question and
    /// `SessionError::Superseded` if another session took over mid-question
    /// (in which case nothing was recorded).
    pub async fn run_question(&mut self) -> Result<AttemptOutcome, SessionError> {
        self.controller.guard().ensure_current()?;
        let Some(animal) = self.current_animal().cloned() else {
            return Err(SessionError::Finished);
        };
        let cap = self.controller.settings().retry_cap();
        self.controller.reset_cycle();

        loop {
            let prior_attempts = self.controller.attempt_count();
            self.controller.announce(&animal).await?;
            self.controller.play(&animal).await?;
            let evaluation = self
                .controller
                .request_attempt(&animal, skip_word_armed(prior_attempts))
                .await?;

            match evaluation {
                AttemptEvaluation::Success => {
                    return Ok(self.record(&animal, AttemptOutcome::Success));
                }
                AttemptEvaluation::Skip => {
                    return Ok(self.record(&animal, AttemptOutcome::Retry));
                }
                AttemptEvaluation::Retry => {
                    if cap.is_some_and(|cap| self.controller.attempt_count() >= cap) {
                        return Ok(self.record(&animal, AttemptOutcome::Retry));
                    }
                }
            }
        }
    }

    /// Wait the advance delay, then move to the next question or finish.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if the session lost ownership
    /// while waiting; no state is mutated in that case.
    pub async fn advance(&mut self) -> Result<ExamStep, SessionError> {
        self.controller.guard().ensure_current()?;
        tokio::time::sleep(self.controller.settings().advance_delay()).await;
        self.controller.guard().ensure_current()?;

        self.controller.reset_cycle();
        if self.current + 1 < self.animals.len() {
            self.current += 1;
            debug!(question = self.current, "exam advanced");
            Ok(ExamStep::NextQuestion(self.current))
        } else {
            self.finished = true;
            debug!(score = self.score(), "exam finished");
            Ok(ExamStep::Finished)
        }
    }

    /// Drive the whole exam to its terminal Finished state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if stopped mid-run.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        while !self.finished {
            self.run_question().await?;
            self.advance().await?;
        }
        Ok(())
    }

    /// Back to a fresh exam: score, results, question index, and attempts
    /// all return to their initial values.
    pub fn restart(&mut self) {
        self.results.clear();
        self.current = 0;
        self.finished = false;
        self.controller.reset_cycle();
    }

    /// Synchronously halt audio and retire this session; pending delays and
    /// completions mutate nothing afterwards.
    pub fn stop(&self) {
        self.controller.halt();
    }

    fn record(&mut self, animal: &Animal, outcome: AttemptOutcome) -> AttemptOutcome {
        self.results.push(ExamRecord::new(animal.name(), outcome));
        outcome
    }
}
