//! Validation seam
//!
//! Validation is delegated to an external collaborator. Anything that can
//! turn a resource's JSON into an [`OperationOutcome`] can be plugged in by
//! implementing [`Validator`]; this crate only interprets the outcome.

use super::error::{Error, Result};
use super::operation_outcome::OperationOutcome;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// External validator collaborator
#[async_trait]
pub trait Validator: Send + Sync {
    /// Validate a resource (or element) in its JSON form
    async fn validate(&self, resource: &Value) -> Result<OperationOutcome>;

    /// Whether an outcome counts as valid; defaults to "no error issues"
    fn is_valid(&self, outcome: &OperationOutcome) -> bool {
        !outcome.has_errors()
    }
}

#[async_trait]
impl<V: Validator + ?Sized> Validator for Arc<V> {
    async fn validate(&self, resource: &Value) -> Result<OperationOutcome> {
        (**self).validate(resource).await
    }

    fn is_valid(&self, outcome: &OperationOutcome) -> bool {
        (**self).is_valid(outcome)
    }
}

/// Adapter turning a synchronous closure into a [`Validator`]
pub struct FnValidator<F> {
    validate: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&Value) -> OperationOutcome + Send + Sync,
{
    pub fn new(validate: F) -> Self {
        Self { validate }
    }
}

#[async_trait]
impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value) -> OperationOutcome + Send + Sync,
{
    async fn validate(&self, resource: &Value) -> Result<OperationOutcome> {
        Ok((self.validate)(resource))
    }
}

/// Turn an outcome into an error when `validator` does not accept it.
///
/// Acceptance is [`Validator::is_valid`]. The error message joins the text of
/// every error issue with `"; "`, falling back to all issues when the
/// validator rejected an outcome that has no errors.
pub fn ensure_valid(
    outcome: OperationOutcome,
    validator: &dyn Validator,
) -> Result<OperationOutcome> {
    if validator.is_valid(&outcome) {
        tracing::debug!(
            warnings = outcome.warning_count(),
            "validation passed"
        );
        return Ok(outcome);
    }

    let message = rejection_message(&outcome);
    tracing::debug!(errors = outcome.error_count(), %message, "validation failed");

    Err(Error::Validation {
        message,
        outcome: Box::new(outcome),
    })
}

fn rejection_message(outcome: &OperationOutcome) -> String {
    if outcome.has_errors() {
        return outcome.error_message();
    }

    let message = outcome
        .issue()
        .iter()
        .map(|issue| issue.message())
        .collect::<Vec<_>>()
        .join("; ");
    if message.is_empty() {
        "outcome rejected by validator".to_string()
    } else {
        message
    }
}
