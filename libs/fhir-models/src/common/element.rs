//! Element substrate
//!
//! Every FHIR datatype, backbone element and resource shares `id` and
//! `extension`; backbone elements and domain resources add `modifierExtension`.
//! These are modelled as traits implemented by each concrete struct rather
//! than as a type hierarchy.

use super::builder::add_to_array;
use super::error::Result;
use super::extension::Extension;
use super::operation_outcome::OperationOutcome;
use super::validation::{ensure_valid, Validator};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base definition for all elements: an internal id plus extensions.
///
/// This is also the type of every primitive shadow field (`_birthDate`,
/// `_status`, ...). A shadow never carries a `value`, only `id` and `extension`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shadow element holding a single extension
    pub fn with_extension(extension: Extension) -> Self {
        Self {
            id: None,
            extension: Some(vec![extension]),
        }
    }

    /// True when neither `id` nor any extension is set
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.as_ref().map_or(true, Vec::is_empty)
    }
}

/// Base definition for elements defined inline in a resource or datatype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackboneElement {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Extensions that cannot be ignored even if unrecognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,
}

impl_element!(Element);
impl_backbone_element!(BackboneElement);

/// Access to the `id` and `extension` fields every element carries
pub trait HasIdAndExtensions {
    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: Option<String>);

    fn extension(&self) -> &[Extension];

    fn extension_mut(&mut self) -> &mut Option<Vec<Extension>>;

    /// Append an extension, creating the list on first use
    fn add_extension(&mut self, extension: Extension) {
        add_to_array(self.extension_mut(), extension);
    }

    /// All extensions with the given canonical URL, in document order
    fn extensions_by_url(&self, url: &str) -> Vec<&Extension> {
        self.extension().iter().filter(|e| e.is(url)).collect()
    }
}

/// Access to `modifierExtension` on backbone elements and domain resources
pub trait HasModifierExtensions: HasIdAndExtensions {
    fn modifier_extension(&self) -> &[Extension];

    fn modifier_extension_mut(&mut self) -> &mut Option<Vec<Extension>>;

    /// Append a modifier extension, creating the list on first use
    fn add_modifier_extension(&mut self, extension: Extension) {
        add_to_array(self.modifier_extension_mut(), extension);
    }
}

/// JSON conversion and validation shared by every model type.
///
/// Decoding copies only keys present in the source; serialization is sparse
/// and emits keys in FHIR-declared order, each `_field` shadow right after
/// its primitive.
#[async_trait]
pub trait FhirElement: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Independent copy sharing no state with `self`
    fn deep_clone(&self) -> Self {
        self.clone()
    }

    /// Run the validator over this element's JSON form
    async fn validate(&self, validator: &dyn Validator) -> Result<OperationOutcome> {
        let json = self.to_json()?;
        validator.validate(&json).await
    }

    /// Validate and fail unless the validator accepts the outcome
    ///
    /// With the default [`Validator::is_valid`] only `error` issues fail;
    /// the returned outcome still carries warnings.
    async fn validate_or_throw(&self, validator: &dyn Validator) -> Result<OperationOutcome> {
        let outcome = self.validate(validator).await?;
        ensure_valid(outcome, validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_is_sparse() {
        let element = Element::new();
        assert!(element.is_empty());
        assert_eq!(element.to_json().unwrap(), json!({}));
    }

    #[test]
    fn test_element_field_order() {
        let element = Element {
            id: Some("e1".to_string()),
            extension: Some(vec![Extension::new("http://example.org/ext")]),
        };

        let json = element.to_json().unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "extension"]);
    }

    #[test]
    fn test_element_absent_keys_stay_unset() {
        let element = Element::from_json(json!({ "id": "x" })).unwrap();
        assert_eq!(element.id.as_deref(), Some("x"));
        assert!(element.extension.is_none());
    }

    #[test]
    fn test_modifier_extension_is_appended() {
        let mut backbone = BackboneElement::default();
        backbone.add_modifier_extension(Extension::new("http://example.org/a"));
        backbone.add_modifier_extension(Extension::new("http://example.org/b"));

        let urls: Vec<_> = backbone
            .modifier_extension()
            .iter()
            .map(|e| e.url.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(urls, vec!["http://example.org/a", "http://example.org/b"]);
        assert!(backbone.extension().is_empty());
    }

    #[test]
    fn test_extensions_by_url() {
        let mut element = Element::new();
        element.add_extension(Extension::new("http://example.org/a"));
        element.add_extension(Extension::new("http://example.org/b"));
        element.add_extension(Extension::new("http://example.org/a"));

        assert_eq!(element.extensions_by_url("http://example.org/a").len(), 2);
        assert!(element.extensions_by_url("http://example.org/c").is_empty());
    }

    #[test]
    fn test_deep_clone_does_not_alias() {
        let original = Element {
            id: Some("e1".to_string()),
            extension: None,
        };
        let mut copy = original.deep_clone();
        copy.add_extension(Extension::new("http://example.org/a"));

        assert!(original.extension.is_none());
        assert_eq!(copy.extension().len(), 1);
    }
}
