//! Error handling for the ATS checker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsCheckerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read document '{path}': {cause}")]
    DocumentRead {
        path: String,
        cause: anyhow::Error,
    },

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, AtsCheckerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AtsCheckerError {
    fn from(err: anyhow::Error) -> Self {
        AtsCheckerError::Processing(err.to_string())
    }
}
