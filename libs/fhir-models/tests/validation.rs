use async_trait::async_trait;
use fhirkit_models::r4::{ObservationBuilder, ObservationStatus, PatientBuilder};
use fhirkit_models::{
    ElementBuilder, Error, FhirElement, FnValidator, IssueSeverity, IssueType, OperationOutcome,
    OperationOutcomeIssue, Result, Validator,
};
use serde_json::Value;
use std::sync::Arc;

/// Validator answering every request with the same issues
struct FixedValidator(Vec<OperationOutcomeIssue>);

#[async_trait]
impl Validator for FixedValidator {
    async fn validate(&self, _resource: &Value) -> Result<OperationOutcome> {
        Ok(OperationOutcome::new(self.0.clone()))
    }
}

struct OfflineValidator;

#[async_trait]
impl Validator for OfflineValidator {
    async fn validate(&self, _resource: &Value) -> Result<OperationOutcome> {
        Err(Error::validator(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "validator offline",
        )))
    }
}

/// Validator whose acceptance rule rejects every outcome
struct RejectingValidator;

#[async_trait]
impl Validator for RejectingValidator {
    async fn validate(&self, _resource: &Value) -> Result<OperationOutcome> {
        Ok(OperationOutcome::new(vec![OperationOutcomeIssue::new(
            IssueSeverity::Information,
            IssueType::Informational,
            "checked",
        )]))
    }

    fn is_valid(&self, _outcome: &OperationOutcome) -> bool {
        false
    }
}

#[tokio::test]
async fn build_or_throw_passes_with_only_warnings() {
    let validator = FixedValidator(vec![
        OperationOutcomeIssue::new(IssueSeverity::Warning, IssueType::BusinessRule, "dom-6"),
        OperationOutcomeIssue::new(IssueSeverity::Information, IssueType::Informational, "ok"),
    ]);

    let patient = PatientBuilder::new()
        .set_active(true)
        .build_or_throw(&validator)
        .await
        .unwrap();

    assert_eq!(patient.active, Some(true));
}

#[tokio::test]
async fn build_or_throw_fails_on_error_issue() {
    let validator = FixedValidator(vec![
        OperationOutcomeIssue::new(
            IssueSeverity::Error,
            IssueType::Required,
            "Observation.status: minimum required = 1",
        ),
        OperationOutcomeIssue::new(IssueSeverity::Warning, IssueType::Value, "ignored"),
        OperationOutcomeIssue::new(
            IssueSeverity::Error,
            IssueType::Required,
            "Observation.code: minimum required = 1",
        ),
    ]);

    let err = ObservationBuilder::new()
        .build_or_throw(&validator)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Validation failed: Observation.status: minimum required = 1; Observation.code: minimum required = 1"
    );
    assert_eq!(err.outcome().unwrap().issue().len(), 3);
}

#[tokio::test]
async fn validator_sees_the_serialized_resource() {
    let validator = FnValidator::new(|resource: &Value| {
        let mut outcome = OperationOutcome::default();
        if resource.get("status").is_none() {
            outcome.add_issue(OperationOutcomeIssue::new(
                IssueSeverity::Error,
                IssueType::Required,
                "status is required",
            ));
        }
        outcome
    });

    assert!(ObservationBuilder::new().build_or_throw(&validator).await.is_err());

    let observation = ObservationBuilder::new()
        .set_status(ObservationStatus::Final)
        .build_or_throw(&validator)
        .await
        .unwrap();
    assert_eq!(observation.status, Some(ObservationStatus::Final));
}

#[tokio::test]
async fn validate_returns_the_raw_outcome() {
    let validator: Arc<dyn Validator> = Arc::new(FixedValidator(vec![OperationOutcomeIssue::new(
        IssueSeverity::Error,
        IssueType::Invalid,
        "bad",
    )]));

    let patient = PatientBuilder::new().build();
    let outcome = patient.validate(validator.as_ref()).await.unwrap();

    assert!(outcome.has_errors());
    assert!(!validator.is_valid(&outcome));
    assert!(patient.validate_or_throw(validator.as_ref()).await.is_err());
}

#[tokio::test]
async fn validator_failure_is_propagated() {
    let err = PatientBuilder::new()
        .build_or_throw(&OfflineValidator)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validator(_)));
    assert!(err.outcome().is_none());
}

#[tokio::test]
async fn build_or_throw_honours_is_valid() {
    let err = ObservationBuilder::new()
        .set_status(ObservationStatus::Final)
        .build_or_throw(&RejectingValidator)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(err.to_string(), "Validation failed: checked");
    assert_eq!(err.outcome().unwrap().error_count(), 0);

    let patient = PatientBuilder::new().build();
    assert!(patient.validate_or_throw(&RejectingValidator).await.is_err());
    assert!(patient.validate(&RejectingValidator).await.is_ok());
}
