//! Remote validator configuration

use crate::error::{Error, Result};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/fhir";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach a FHIR server's `$validate` operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteValidatorConfig {
    /// FHIR base URL, e.g. `https://hapi.fhir.org/baseR4`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Sent as `Authorization: Bearer <token>` when set
    pub bearer_token: Option<String>,
}

impl RemoteValidatorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Base URL without trailing slashes
    pub(crate) fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// `$validate` endpoint for a resource type, or the system level one
    pub fn validate_url(&self, resource_type: Option<&str>) -> String {
        match resource_type {
            Some(resource_type) => format!("{}/{}/$validate", self.base(), resource_type),
            None => format!("{}/$validate", self.base()),
        }
    }

    pub fn check(&self) -> Result<()> {
        let base = self.base();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for RemoteValidatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            bearer_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_trims_trailing_slash() {
        let config = RemoteValidatorConfig::new("https://fhir.example.org/r4/");
        assert_eq!(
            config.validate_url(Some("Patient")),
            "https://fhir.example.org/r4/Patient/$validate"
        );
        assert_eq!(config.validate_url(None), "https://fhir.example.org/r4/$validate");
    }

    #[test]
    fn test_check_rejects_bad_values() {
        assert!(RemoteValidatorConfig::default().check().is_ok());
        assert!(RemoteValidatorConfig::new("fhir.example.org").check().is_err());
        assert!(RemoteValidatorConfig::default()
            .with_timeout(Duration::ZERO)
            .check()
            .is_err());
    }
}
