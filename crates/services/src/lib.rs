#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use zoo_core::Clock;

pub use error::SessionError;

pub use sessions::{
    ElapsedTimeEstimator, ExamSession, ExamStep, PlaybackPositionEstimator, PracticeSession,
    ProgressEstimator, ProgressSample, Prompts, SessionController, SessionFactory, SessionGuard,
    SessionMonitor, SessionRegistry, SlideshowSession,
};
