use fhirkit_models::r4::{ObservationBuilder, ObservationStatus, PatientBuilder};
use fhirkit_models::{ElementBuilder, FhirElement, IssueType};
use fhirkit_validator::{Error, RemoteValidator, RemoteValidatorConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn outcome(issues: serde_json::Value) -> serde_json::Value {
    json!({ "resourceType": "OperationOutcome", "issue": issues })
}

fn validator_for(server: &MockServer) -> RemoteValidator {
    RemoteValidator::with_base_url(format!("{}/fhir/", server.uri())).unwrap()
}

#[tokio::test]
async fn posts_resource_to_type_level_validate() {
    let server = MockServer::start().await;
    let patient = PatientBuilder::new().set_active(true).build();

    Mock::given(method("POST"))
        .and(path("/fhir/Patient/$validate"))
        .and(header("content-type", "application/fhir+json"))
        .and(body_json(patient.to_json().unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(outcome(json!([
            { "severity": "information", "code": "informational", "diagnostics": "All OK" }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let validator = validator_for(&server);
    let outcome = validator.validate_json(&patient.to_json().unwrap()).await.unwrap();

    assert!(!outcome.has_errors());
    assert_eq!(outcome.issue().len(), 1);
}

#[tokio::test]
async fn build_or_throw_passes_on_warnings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fhir/Observation/$validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(outcome(json!([
            { "severity": "warning", "code": "business-rule", "diagnostics": "dom-6: A resource should have narrative" }
        ]))))
        .mount(&server)
        .await;

    let observation = ObservationBuilder::new()
        .set_status(ObservationStatus::Final)
        .build_or_throw(&validator_for(&server))
        .await
        .unwrap();

    assert_eq!(observation.status, Some(ObservationStatus::Final));
}

#[tokio::test]
async fn r5_success_outcome_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fhir/Patient/$validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(outcome(json!([
            { "severity": "information", "code": "success", "diagnostics": "No issues detected" },
            { "severity": "warning", "code": "limited-filter", "diagnostics": "Profile filter ignored" }
        ]))))
        .mount(&server)
        .await;

    let validator = validator_for(&server);
    let patient = PatientBuilder::new()
        .set_active(true)
        .build_or_throw(&validator)
        .await
        .unwrap();
    assert_eq!(patient.active, Some(true));

    let outcome = validator.validate_json(&patient.to_json().unwrap()).await.unwrap();
    assert_eq!(outcome.issue()[0].code, Some(IssueType::Success));
    assert_eq!(outcome.issue()[1].code, Some(IssueType::LimitedFilter));
}

#[tokio::test]
async fn build_or_throw_fails_on_rejected_resource() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fhir/Observation/$validate"))
        .respond_with(ResponseTemplate::new(422).set_body_json(outcome(json!([
            { "severity": "error", "code": "required", "diagnostics": "Observation.status: minimum required = 1" },
            { "severity": "error", "code": "required", "details": { "text": "Observation.code: minimum required = 1" } }
        ]))))
        .mount(&server)
        .await;

    let err = ObservationBuilder::new()
        .build_or_throw(&validator_for(&server))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Validation failed: Observation.status: minimum required = 1; Observation.code: minimum required = 1"
    );
    assert_eq!(err.outcome().unwrap().error_count(), 2);
}

#[tokio::test]
async fn sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fhir/Patient/$validate"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(outcome(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let config =
        RemoteValidatorConfig::new(format!("{}/fhir", server.uri())).with_bearer_token("secret");
    let validator = RemoteValidator::new(config).unwrap();

    let outcome = validator
        .validate_json(&json!({ "resourceType": "Patient" }))
        .await
        .unwrap();
    assert!(outcome.issue().is_empty());
}

#[tokio::test]
async fn elements_go_to_system_level_validate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fhir/$validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(outcome(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let validator = validator_for(&server);
    validator
        .validate_json(&json!({ "family": "Doe" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn server_failure_is_reported_as_validator_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let validator = validator_for(&server);

    let err = validator
        .validate_json(&json!({ "resourceType": "Patient" }))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Status { status: 500, ref body } if body == "internal error"));

    let err = PatientBuilder::new()
        .build_or_throw(&validator)
        .await
        .unwrap_err();
    assert!(matches!(err, fhirkit_models::Error::Validator(_)));
    assert!(err.outcome().is_none());
}

#[tokio::test]
async fn non_outcome_response_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "resourceType": "Parameters" })),
        )
        .mount(&server)
        .await;

    let err = validator_for(&server)
        .validate_json(&json!({ "resourceType": "Patient" }))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse(ref found) if found == "Parameters"));
}
