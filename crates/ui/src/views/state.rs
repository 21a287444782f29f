/// View-level error state, deliberately coarse: the services layer already
/// absorbed everything recoverable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptyRoster,
    /// The running session was superseded or stopped; not an error to show.
    Stopped,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ViewError::EmptyRoster => "No animals to show yet.",
            ViewError::Stopped => "Session stopped.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}
