// Core error taxonomy. Nothing here is fatal to the process; every variant
// is recoverable at the call site (the API layer maps them to responses).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// An OS metric read failed outright. Logged and skipped per tick by the
    /// recording loop; live callers see it as a 5xx.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),

    #[error("a recording session is already active")]
    AlreadyRecording,

    #[error("no recording session is active")]
    NotRecording,

    /// A report needs at least two samples to show a trend.
    #[error("not enough recorded samples for a report: got {got}, need {need}")]
    InsufficientData { got: usize, need: usize },
}
