use thiserror::Error;

/// Configuration errors that abort the whole run before any task starts
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("unknown segment: {0}")]
    UnknownSegment(String),

    #[error("segment {0} does not take a parameter")]
    ParameterNotAccepted(String),

    #[error("segment {0} needs a parameter ({0}=VALUE)")]
    ParameterRequired(String),

    #[error("segment {0} requested more than once")]
    DuplicateSegment(String),

    #[error("invalid duration {0:?}, expected e.g. 500ms, 1s or 1m30s")]
    InvalidDuration(String),

    #[error("segment task failed to join: {0}")]
    Join(#[from] tokio::task::JoinError),
}
