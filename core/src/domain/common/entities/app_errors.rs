use thiserror::Error;

/// Error taxonomy for the detection pipeline. Each variant maps to a
/// distinct HTTP classification at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upstream model error: {0}")]
    UpstreamError(String),

    #[error("persistence error: {0}")]
    PersistenceError(String),

    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("internal server error")]
    InternalServerError,
}
