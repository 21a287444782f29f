#![forbid(unsafe_code)]

//! Platform speech capabilities behind trait contracts.
//!
//! The session controller never talks to the platform directly; it drives a
//! [`SpeechStack`] of three injected collaborators (announcer, clip player,
//! voice recognizer). Desktop adapters live in [`desktop`], scripted fakes
//! for tests in [`scripted`]. Capability detection happens once at startup,
//! not ad hoc at call sites.

pub mod capability;
pub mod desktop;
pub mod scripted;

pub use capability::{
    AnnounceError, ClipPlayer, PlaybackError, RecognitionError, RecognizerConfig, SpeechAnnouncer,
    SpeechStack, VoiceRecognizer,
};
