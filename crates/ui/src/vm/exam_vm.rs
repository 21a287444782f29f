use services::{ExamSession, ExamStep, SessionError, SessionFactory, SessionMonitor};
use zoo_core::model::{AttemptOutcome, Roster};

use crate::views::ViewError;

/// Where the exam run currently is, from the view's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamStage {
    /// A question is being asked (announce/play/listen loop).
    Asking,
    /// Question answered; waiting out the advance delay.
    Waiting,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamQuestionVm {
    pub name: String,
    pub emoji: String,
    pub index: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamRowVm {
    pub name: String,
    pub passed: bool,
}

/// Everything the exam view renders for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamViewState {
    pub stage: ExamStage,
    pub question: Option<ExamQuestionVm>,
    pub score: usize,
    pub total: usize,
    pub rows: Vec<ExamRowVm>,
}

/// Owns a running exam and narrates it to the view.
pub struct ExamVm {
    exam: ExamSession,
    stage: ExamStage,
}

impl ExamVm {
    /// # Errors
    ///
    /// Returns `ViewError::EmptyRoster` when there is nothing to ask.
    pub fn start(factory: &SessionFactory, roster: &Roster) -> Result<Self, ViewError> {
        let exam = factory.exam(roster).map_err(|err| match err {
            SessionError::Empty => ViewError::EmptyRoster,
            _ => ViewError::Unknown,
        })?;
        Ok(Self {
            exam,
            stage: ExamStage::Asking,
        })
    }

    #[must_use]
    pub fn monitor(&self) -> SessionMonitor {
        self.exam.monitor()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stage == ExamStage::Finished
    }

    #[must_use]
    pub fn view_state(&self) -> ExamViewState {
        let question = self.exam.current_animal().map(|animal| ExamQuestionVm {
            name: animal.name().to_owned(),
            emoji: animal.emoji().to_owned(),
            index: self.exam.current_index(),
            total: self.exam.total_questions(),
        });
        let rows = self
            .exam
            .results()
            .records()
            .iter()
            .map(|record| ExamRowVm {
                name: record.animal_name.clone(),
                passed: record.outcome == AttemptOutcome::Success,
            })
            .collect();
        ExamViewState {
            stage: self.stage,
            question,
            score: self.exam.score(),
            total: self.exam.total_questions(),
            rows,
        }
    }

    /// One step of the exam loop. Returns `false` once the run is over.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Stopped` when another session took the channel.
    pub async fn step(&mut self) -> Result<bool, ViewError> {
        match self.stage {
            ExamStage::Asking => {
                self.exam.run_question().await.map_err(map_session_error)?;
                self.stage = ExamStage::Waiting;
                Ok(true)
            }
            ExamStage::Waiting => match self.exam.advance().await.map_err(map_session_error)? {
                ExamStep::NextQuestion(_) => {
                    self.stage = ExamStage::Asking;
                    Ok(true)
                }
                ExamStep::Finished => {
                    self.stage = ExamStage::Finished;
                    Ok(false)
                }
            },
            ExamStage::Finished => Ok(false),
        }
    }

    pub fn stop(&self) {
        self.exam.stop();
    }
}

fn map_session_error(err: SessionError) -> ViewError {
    match err {
        SessionError::Superseded => ViewError::Stopped,
        _ => ViewError::Unknown,
    }
}
