//! Command implementations

use anyhow::{Context, Result};
use fhirkit_models::{
    FhirElement, FhirVersion, OperationOutcome, OperationOutcomeIssue, Validator,
};
use fhirkit_validator::{RemoteValidator, RemoteValidatorConfig};
use serde_json::Value;
use std::path::Path;
use std::process::ExitCode;

pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Decode `value` into the release's typed resource and encode it again.
///
/// The result carries keys in FHIR-declared order with empty fields removed.
pub fn normalize(value: Value, version: FhirVersion) -> Result<Value> {
    let json = match version {
        FhirVersion::R4 => fhirkit_models::r4::Resource::from_json(value)?.to_json()?,
        FhirVersion::R4B => fhirkit_models::r4b::Resource::from_json(value)?.to_json()?,
        FhirVersion::R5 => fhirkit_models::r5::Resource::from_json(value)?.to_json()?,
    };
    Ok(json)
}

pub fn normalize_file(path: &Path, version: FhirVersion, compact: bool) -> Result<String> {
    let value = read_json(path)?;
    let json = normalize(value, version)
        .with_context(|| format!("Failed to decode {} as {version}", path.display()))?;

    let output = if compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    Ok(output)
}

/// Result of a `$validate` call as the CLI reports it
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub outcome: OperationOutcome,
    /// Whether the validator accepted the outcome
    pub valid: bool,
}

impl Report {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = issue_lines(&self.outcome);
        if lines.is_empty() && !self.valid {
            lines.push("rejected without issues".to_string());
        }
        lines
    }

    /// Print [`Report::lines`] to stdout and log the verdict
    pub fn emit(&self) -> ExitCode {
        for line in self.lines() {
            println!("{line}");
        }

        if self.valid {
            tracing::info!(warnings = self.outcome.warning_count(), "validation passed");
            ExitCode::SUCCESS
        } else {
            tracing::error!(errors = self.outcome.error_count(), "validation failed");
            ExitCode::FAILURE
        }
    }
}

pub async fn validate_file(
    path: &Path,
    version: FhirVersion,
    config: RemoteValidatorConfig,
) -> Result<Report> {
    let value = read_json(path)?;
    let json = normalize(value, version)
        .with_context(|| format!("Failed to decode {} as {version}", path.display()))?;

    let url = config.validate_url(json.get("resourceType").and_then(Value::as_str));
    let validator = RemoteValidator::new(config).context("Invalid validator configuration")?;

    tracing::info!(file = %path.display(), %url, "validating");
    let outcome = validator
        .validate_json(&json)
        .await
        .with_context(|| format!("$validate call to {url} failed"))?;

    Ok(Report {
        valid: validator.is_valid(&outcome),
        outcome,
    })
}

/// One printable line per issue: `severity [code] message @ expression`
pub fn issue_lines(outcome: &OperationOutcome) -> Vec<String> {
    outcome.issue().iter().map(issue_line).collect()
}

fn issue_line(issue: &OperationOutcomeIssue) -> String {
    let severity = issue
        .severity
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut line = match issue.code {
        Some(code) => format!("{severity} [{code}] {}", issue.message()),
        None => format!("{severity} {}", issue.message()),
    };

    let paths = issue
        .expression
        .as_deref()
        .or(issue.location.as_deref())
        .unwrap_or_default();
    if !paths.is_empty() {
        line.push_str(" @ ");
        line.push_str(&paths.join(", "));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirkit_models::{IssueSeverity, IssueType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value.as_object().unwrap().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_normalize_reorders_keys() {
        let source = json!({
            "gender": "female",
            "name": [{ "given": ["Ann"], "family": "Lee" }],
            "id": "p1",
            "resourceType": "Patient"
        });

        let normalized = normalize(source, FhirVersion::R4).unwrap();

        assert_eq!(keys(&normalized), vec!["resourceType", "id", "name", "gender"]);
        assert_eq!(keys(&normalized["name"][0]), vec!["family", "given"]);
    }

    #[test]
    fn test_normalize_same_document_per_release() {
        let source = json!({ "resourceType": "Observation", "status": "final" });

        for version in [FhirVersion::R4, FhirVersion::R4B, FhirVersion::R5] {
            assert_eq!(normalize(source.clone(), version).unwrap(), source);
        }
    }

    #[test]
    fn test_normalize_unsupported_type() {
        let err = normalize(json!({ "resourceType": "Encounter" }), FhirVersion::R5).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported resource type: Encounter");
    }

    #[test]
    fn test_normalize_file_compact() {
        let path = std::env::temp_dir().join(format!("fhirkit-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "active": true, "resourceType": "Patient" }"#).unwrap();

        let output = normalize_file(&path, FhirVersion::R4, true).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(output, r#"{"resourceType":"Patient","active":true}"#);
    }

    #[test]
    fn test_report_lines() {
        let outcome = OperationOutcome::new(vec![OperationOutcomeIssue::new(
            IssueSeverity::Warning,
            IssueType::BusinessRule,
            "dom-6",
        )]);
        let report = Report { outcome, valid: true };
        assert_eq!(report.lines(), vec!["warning [business-rule] dom-6".to_string()]);

        let rejected = Report { outcome: OperationOutcome::default(), valid: false };
        assert_eq!(rejected.lines(), vec!["rejected without issues".to_string()]);
        assert!(Report { outcome: OperationOutcome::default(), valid: true }.lines().is_empty());
    }

    #[test]
    fn test_issue_lines() {
        let outcome = OperationOutcome::new(vec![
            OperationOutcomeIssue::new(IssueSeverity::Error, IssueType::Required, "missing status")
                .with_expression("Observation.status"),
            OperationOutcomeIssue::new(IssueSeverity::Warning, IssueType::BusinessRule, "dom-6"),
        ]);

        assert_eq!(
            issue_lines(&outcome),
            vec![
                "error [required] missing status @ Observation.status".to_string(),
                "warning [business-rule] dom-6".to_string(),
            ]
        );
    }
}
