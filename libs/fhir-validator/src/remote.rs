//! HTTP `$validate` client

use crate::config::RemoteValidatorConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use fhirkit_models::{OperationOutcome, Validator};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

const FHIR_JSON: &str = "application/fhir+json";

/// Validator backed by a FHIR server's `$validate` operation.
///
/// The resource is posted as-is; whatever OperationOutcome the server answers
/// with is handed back, also on 4xx statuses, since servers commonly report
/// invalid resources that way.
pub struct RemoteValidator {
    client: Client,
    config: RemoteValidatorConfig,
}

impl RemoteValidator {
    pub fn new(config: RemoteValidatorConfig) -> Result<Self> {
        config.check()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Validator for `base_url` with default settings
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(RemoteValidatorConfig::new(base_url))
    }

    pub fn config(&self) -> &RemoteValidatorConfig {
        &self.config
    }

    /// Post `resource` to the matching `$validate` endpoint.
    ///
    /// Resources go to `{base}/{resourceType}/$validate`, JSON without a
    /// `resourceType` to the system level `{base}/$validate`.
    pub async fn validate_json(&self, resource: &Value) -> Result<OperationOutcome> {
        let resource_type = resource.get("resourceType").and_then(Value::as_str);
        let url = self.config.validate_url(resource_type);
        tracing::debug!(%url, "posting resource to $validate");

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, FHIR_JSON)
            .header(ACCEPT, FHIR_JSON)
            .body(serde_json::to_vec(resource)?);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let outcome = parse_outcome(status, &body)?;
        tracing::debug!(
            status,
            errors = outcome.error_count(),
            warnings = outcome.warning_count(),
            "received validation outcome"
        );
        Ok(outcome)
    }
}

#[async_trait]
impl Validator for RemoteValidator {
    async fn validate(&self, resource: &Value) -> fhirkit_models::Result<OperationOutcome> {
        Ok(self.validate_json(resource).await?)
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_outcome(status: u16, body: &str) -> Result<OperationOutcome> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) if is_success(status) => return Err(err.into()),
        Err(_) => {
            return Err(Error::Status {
                status,
                body: body.to_string(),
            })
        }
    };

    match value.get("resourceType").and_then(Value::as_str) {
        Some("OperationOutcome") => Ok(serde_json::from_value(value)?),
        _ if !is_success(status) => Err(Error::Status {
            status,
            body: body.to_string(),
        }),
        Some(other) => Err(Error::UnexpectedResponse(other.to_string())),
        None => Err(Error::UnexpectedResponse("JSON without resourceType".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outcome_on_error_status() {
        let body = r#"{"resourceType":"OperationOutcome","issue":[{"severity":"error","code":"required","diagnostics":"Patient.name"}]}"#;
        let outcome = parse_outcome(422, body).unwrap();
        assert!(outcome.has_errors());
    }

    #[test]
    fn test_parse_outcome_rejects_other_resources() {
        let err = parse_outcome(200, r#"{"resourceType":"Bundle"}"#).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(ref found) if found == "Bundle"));

        let err = parse_outcome(200, r#"{"ok":true}"#).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn test_parse_outcome_non_json() {
        assert!(matches!(parse_outcome(200, "<html/>"), Err(Error::Json(_))));
        assert!(matches!(
            parse_outcome(503, "Service Unavailable"),
            Err(Error::Status { status: 503, .. })
        ));
    }
}
