//! Error types for FHIR models

use super::operation_outcome::OperationOutcome;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The validator reported at least one `error` severity issue
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        outcome: Box<OperationOutcome>,
    },

    #[error("Validator unavailable: {0}")]
    Validator(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing resourceType")]
    MissingResourceType,

    #[error("Unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    #[error("Unsupported FHIR version: {0}")]
    UnsupportedVersion(String),
}

impl Error {
    /// Wrap a validator transport/processing failure
    pub fn validator<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Validator(err.into())
    }

    /// The outcome behind a validation failure, if this is one
    pub fn outcome(&self) -> Option<&OperationOutcome> {
        match self {
            Self::Validation { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
