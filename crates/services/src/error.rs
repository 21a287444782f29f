//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by session services.
///
/// Capability failures (synthesis, playback, recognition) never appear here;
/// the controller absorbs them into spoken retry prompts. What remains is
/// lifecycle misuse and ownership loss.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// A newer session took ownership; the caller's pending work is void.
    #[error("session superseded by a newer one")]
    Superseded,

    #[error("no animals available for session")]
    Empty,

    #[error("session already finished")]
    Finished,

    #[error("replay is not available until playback has finished")]
    ReplayNotReady,
}
