mod animal;
mod clip;
mod exam;
mod record;
mod session;
mod settings;

pub use animal::{Animal, AnimalError, Roster};
pub use clip::{ClipError, ClipRef};
pub use exam::{ExamRecord, ExamResults};
pub use record::{AnimalRecord, roster_from_records};
pub use session::{AttemptEvaluation, AttemptOutcome, SessionPhase, SessionToken};
pub use settings::{SessionSettings, SettingsError};
