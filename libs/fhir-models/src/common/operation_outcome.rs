//! FHIR OperationOutcome model
//!
//! Version-agnostic model for the outcome returned by validators and servers.

use super::datatypes::{CodeableConcept, Meta, Narrative};
use super::element::Element;
use super::extension::Extension;
use super::resource::ResourceTypeTag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR OperationOutcome resource
///
/// Information about the success or failure of an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    /// Resource type - always "OperationOutcome"
    #[serde(default)]
    pub resource_type: ResourceTypeTag<OperationOutcome>,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Metadata about the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// A set of rules under which this content was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<String>,
    #[serde(rename = "_implicitRules", skip_serializing_if = "Option::is_none")]
    pub implicit_rules_element: Option<Element>,

    /// Language of the resource content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "_language", skip_serializing_if = "Option::is_none")]
    pub language_element: Option<Element>,

    /// Text summary of the resource, for human interpretation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    /// Contained, inline Resources (kept as raw JSON; the outcome is version-agnostic)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Value>>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Extensions that cannot be ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// A single issue associated with the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Vec<OperationOutcomeIssue>>,

    /// Additional content beyond the modelled fields
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl_domain_resource!(OperationOutcome, "OperationOutcome", Value);

impl OperationOutcome {
    pub fn new(issues: Vec<OperationOutcomeIssue>) -> Self {
        Self {
            issue: Some(issues),
            ..Default::default()
        }
    }

    pub fn issue(&self) -> &[OperationOutcomeIssue] {
        self.issue.as_deref().unwrap_or_default()
    }

    pub fn add_issue(&mut self, issue: OperationOutcomeIssue) {
        super::builder::add_to_array(&mut self.issue, issue);
    }

    /// Issues with `error` severity
    pub fn errors(&self) -> impl Iterator<Item = &OperationOutcomeIssue> {
        self.issue()
            .iter()
            .filter(|i| i.severity == Some(IssueSeverity::Error))
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.issue()
            .iter()
            .filter(|i| i.severity == Some(IssueSeverity::Warning))
            .count()
    }

    /// The text of every error issue, joined with `"; "`
    pub fn error_message(&self) -> String {
        self.errors()
            .map(OperationOutcomeIssue::message)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single issue associated with the action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcomeIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// fatal | error | warning | information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<IssueSeverity>,
    #[serde(rename = "_severity", skip_serializing_if = "Option::is_none")]
    pub severity_element: Option<Element>,

    /// Error or warning code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<IssueType>,
    #[serde(rename = "_code", skip_serializing_if = "Option::is_none")]
    pub code_element: Option<Element>,

    /// Additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CodeableConcept>,

    /// Additional diagnostic information about the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
    #[serde(rename = "_diagnostics", skip_serializing_if = "Option::is_none")]
    pub diagnostics_element: Option<Element>,

    /// Deprecated: Path of element(s) related to issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<String>>,
    #[serde(rename = "_location", skip_serializing_if = "Option::is_none")]
    pub location_element: Option<Vec<Option<Element>>>,

    /// FHIRPath of element(s) related to issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Vec<String>>,
    #[serde(rename = "_expression", skip_serializing_if = "Option::is_none")]
    pub expression_element: Option<Vec<Option<Element>>>,
}

impl_backbone_element!(OperationOutcomeIssue);

impl OperationOutcomeIssue {
    pub fn new(severity: IssueSeverity, code: IssueType, diagnostics: impl Into<String>) -> Self {
        Self {
            severity: Some(severity),
            code: Some(code),
            diagnostics: Some(diagnostics.into()),
            ..Default::default()
        }
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        super::builder::add_to_array(&mut self.expression, expression.into());
        self
    }

    /// Human-readable text: diagnostics, else `details.text`, else the issue code
    pub fn message(&self) -> String {
        if let Some(diagnostics) = &self.diagnostics {
            return diagnostics.clone();
        }

        if let Some(text) = self.details.as_ref().and_then(|d| d.text.as_ref()) {
            return text.clone();
        }

        match self.code {
            Some(code) => code.to_string(),
            None => "unknown issue".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fatal => write!(f, "fatal"),
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Information => write!(f, "information"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Invalid,
    Structure,
    Required,
    Value,
    Invariant,
    Security,
    Login,
    Unknown,
    Expired,
    Forbidden,
    Suppressed,
    Processing,
    NotSupported,
    /// R5
    LimitedFilter,
    Duplicate,
    MultipleMatches,
    NotFound,
    Deleted,
    TooLong,
    CodeInvalid,
    Extension,
    TooCostly,
    BusinessRule,
    Conflict,
    Transient,
    LockError,
    NoStore,
    Exception,
    Timeout,
    Incomplete,
    Throttled,
    Informational,
    /// R5
    Success,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Invalid => "invalid",
            Self::Structure => "structure",
            Self::Required => "required",
            Self::Value => "value",
            Self::Invariant => "invariant",
            Self::Security => "security",
            Self::Login => "login",
            Self::Unknown => "unknown",
            Self::Expired => "expired",
            Self::Forbidden => "forbidden",
            Self::Suppressed => "suppressed",
            Self::Processing => "processing",
            Self::NotSupported => "not-supported",
            Self::LimitedFilter => "limited-filter",
            Self::Duplicate => "duplicate",
            Self::MultipleMatches => "multiple-matches",
            Self::NotFound => "not-found",
            Self::Deleted => "deleted",
            Self::TooLong => "too-long",
            Self::CodeInvalid => "code-invalid",
            Self::Extension => "extension",
            Self::TooCostly => "too-costly",
            Self::BusinessRule => "business-rule",
            Self::Conflict => "conflict",
            Self::Transient => "transient",
            Self::LockError => "lock-error",
            Self::NoStore => "no-store",
            Self::Exception => "exception",
            Self::Timeout => "timeout",
            Self::Incomplete => "incomplete",
            Self::Throttled => "throttled",
            Self::Informational => "informational",
            Self::Success => "success",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::element::FhirElement;
    use serde_json::json;

    #[test]
    fn test_outcome_counts() {
        let outcome = OperationOutcome::new(vec![
            OperationOutcomeIssue::new(IssueSeverity::Error, IssueType::Required, "Missing required field"),
            OperationOutcomeIssue::new(IssueSeverity::Warning, IssueType::Value, "Deprecated code"),
            OperationOutcomeIssue::new(IssueSeverity::Fatal, IssueType::Exception, "Crashed"),
        ]);

        assert!(outcome.has_errors());
        assert_eq!(outcome.error_count(), 1);
        assert_eq!(outcome.warning_count(), 1);
    }

    #[test]
    fn test_parse_outcome_json() {
        let outcome = OperationOutcome::from_json(json!({
            "resourceType": "OperationOutcome",
            "issue": [
                {
                    "severity": "error",
                    "code": "code-invalid",
                    "details": { "text": "Unknown code 'xyz'" },
                    "expression": ["Patient.gender"]
                },
                { "severity": "information", "code": "informational", "diagnostics": "ok" }
            ]
        }))
        .unwrap();

        assert_eq!(outcome.issue().len(), 2);
        assert_eq!(outcome.issue()[0].code, Some(IssueType::CodeInvalid));
        assert_eq!(outcome.error_message(), "Unknown code 'xyz'");
    }

    #[test]
    fn test_r5_issue_codes() {
        let outcome = OperationOutcome::from_json(json!({
            "resourceType": "OperationOutcome",
            "issue": [
                { "severity": "information", "code": "success", "diagnostics": "All OK" },
                { "severity": "warning", "code": "limited-filter", "diagnostics": "Filter ignored" }
            ]
        }))
        .unwrap();

        assert_eq!(outcome.issue()[0].code, Some(IssueType::Success));
        assert_eq!(outcome.issue()[1].code, Some(IssueType::LimitedFilter));
        assert!(!outcome.has_errors());
        assert_eq!(IssueType::LimitedFilter.to_string(), "limited-filter");
        assert_eq!(
            serde_json::to_value(IssueType::Success).unwrap(),
            json!("success")
        );
    }

    #[test]
    fn test_outcome_rejects_other_resource_type() {
        let result = OperationOutcome::from_json(json!({ "resourceType": "Patient" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_issue_message_falls_back_to_code() {
        let issue = OperationOutcomeIssue {
            severity: Some(IssueSeverity::Error),
            code: Some(IssueType::NotSupported),
            ..Default::default()
        };
        assert_eq!(issue.message(), "not-supported");
    }

    #[test]
    fn test_issue_serialization_order() {
        let issue = OperationOutcomeIssue::new(IssueSeverity::Error, IssueType::Required, "x")
            .with_expression("Patient.name");
        let json = issue.to_json().unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["severity", "code", "diagnostics", "expression"]);
    }
}
