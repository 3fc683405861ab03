//! Error types for the remote validator

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("validator returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an OperationOutcome, got {0}")]
    UnexpectedResponse(String),
}

impl From<Error> for fhirkit_models::Error {
    fn from(err: Error) -> Self {
        fhirkit_models::Error::validator(err)
    }
}
