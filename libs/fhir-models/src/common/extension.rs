//! FHIR Extension
//!
//! `value[x]` is an enum flattened into the extension, so the wire key is
//! `valueString`, `valueCoding`, ... Element data for primitive variants
//! lives in a second flattened enum keyed `_valueString`, ...

use super::datatypes::{
    Address, Annotation, Attachment, CodeableConcept, CodeableReference, Coding, ContactDetail,
    ContactPoint, HumanName, Identifier, Integer64, Meta, Money, Period, Quantity, Range, Ratio,
    Reference, UsageContext,
};
use super::element::Element;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Optional extension element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Nested extensions (complex extensions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Identifies the meaning of the extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Value of extension
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<ExtensionValue>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_element: Option<ExtensionValueElement>,

    /// `value[x]` variants of datatypes not modelled here
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl_element!(Extension);

impl Extension {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_value(url: impl Into<String>, value: impl Into<ExtensionValue>) -> Self {
        Self {
            url: Some(url.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Replace the value, dropping element data of the previous variant
    pub fn set_value(&mut self, value: impl Into<ExtensionValue>) {
        super::builder::set_choice(&mut self.value, value.into(), &mut self.value_element);
    }

    /// True when this extension has the given canonical URL
    pub fn is(&self, url: &str) -> bool {
        self.url.as_deref() == Some(url)
    }
}

/// Value of extension - one of the FHIR datatypes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtensionValue {
    #[serde(rename = "valueBase64Binary")]
    Base64Binary(String),
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueCanonical")]
    Canonical(String),
    #[serde(rename = "valueCode")]
    Code(String),
    #[serde(rename = "valueDate")]
    Date(String),
    #[serde(rename = "valueDateTime")]
    DateTime(String),
    #[serde(rename = "valueDecimal", with = "crate::common::decimal")]
    Decimal(Decimal),
    #[serde(rename = "valueId")]
    Id(String),
    #[serde(rename = "valueInstant")]
    Instant(String),
    #[serde(rename = "valueInteger")]
    Integer(i32),
    /// R5 only
    #[serde(rename = "valueInteger64")]
    Integer64(Integer64),
    #[serde(rename = "valueMarkdown")]
    Markdown(String),
    #[serde(rename = "valueOid")]
    Oid(String),
    #[serde(rename = "valuePositiveInt")]
    PositiveInt(u32),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueTime")]
    Time(String),
    #[serde(rename = "valueUnsignedInt")]
    UnsignedInt(u32),
    #[serde(rename = "valueUri")]
    Uri(String),
    #[serde(rename = "valueUrl")]
    Url(String),
    #[serde(rename = "valueUuid")]
    Uuid(String),
    #[serde(rename = "valueAddress")]
    Address(Address),
    #[serde(rename = "valueAnnotation")]
    Annotation(Annotation),
    #[serde(rename = "valueAttachment")]
    Attachment(Attachment),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    /// R5 only
    #[serde(rename = "valueCodeableReference")]
    CodeableReference(CodeableReference),
    #[serde(rename = "valueCoding")]
    Coding(Coding),
    #[serde(rename = "valueContactDetail")]
    ContactDetail(ContactDetail),
    #[serde(rename = "valueContactPoint")]
    ContactPoint(ContactPoint),
    #[serde(rename = "valueHumanName")]
    HumanName(HumanName),
    #[serde(rename = "valueIdentifier")]
    Identifier(Identifier),
    #[serde(rename = "valueMeta")]
    Meta(Meta),
    #[serde(rename = "valueMoney")]
    Money(Money),
    #[serde(rename = "valuePeriod")]
    Period(Period),
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueRange")]
    Range(Range),
    #[serde(rename = "valueRatio")]
    Ratio(Ratio),
    #[serde(rename = "valueReference")]
    Reference(Reference),
    #[serde(rename = "valueUsageContext")]
    UsageContext(UsageContext),
}

impl_choice!(ExtensionValue {
    "valueBase64Binary",
    "valueBoolean",
    "valueCanonical",
    "valueCode",
    "valueDate",
    "valueDateTime",
    "valueDecimal",
    "valueId",
    "valueInstant",
    "valueInteger",
    "valueInteger64",
    "valueMarkdown",
    "valueOid",
    "valuePositiveInt",
    "valueString",
    "valueTime",
    "valueUnsignedInt",
    "valueUri",
    "valueUrl",
    "valueUuid",
    "valueAddress",
    "valueAnnotation",
    "valueAttachment",
    "valueCodeableConcept",
    "valueCodeableReference",
    "valueCoding",
    "valueContactDetail",
    "valueContactPoint",
    "valueHumanName",
    "valueIdentifier",
    "valueMeta",
    "valueMoney",
    "valuePeriod",
    "valueQuantity",
    "valueRange",
    "valueRatio",
    "valueReference",
    "valueUsageContext",
});

/// Element data for a primitive `value[x]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtensionValueElement {
    #[serde(rename = "_valueBase64Binary")]
    Base64Binary(Element),
    #[serde(rename = "_valueBoolean")]
    Boolean(Element),
    #[serde(rename = "_valueCanonical")]
    Canonical(Element),
    #[serde(rename = "_valueCode")]
    Code(Element),
    #[serde(rename = "_valueDate")]
    Date(Element),
    #[serde(rename = "_valueDateTime")]
    DateTime(Element),
    #[serde(rename = "_valueDecimal")]
    Decimal(Element),
    #[serde(rename = "_valueId")]
    Id(Element),
    #[serde(rename = "_valueInstant")]
    Instant(Element),
    #[serde(rename = "_valueInteger")]
    Integer(Element),
    #[serde(rename = "_valueInteger64")]
    Integer64(Element),
    #[serde(rename = "_valueMarkdown")]
    Markdown(Element),
    #[serde(rename = "_valueOid")]
    Oid(Element),
    #[serde(rename = "_valuePositiveInt")]
    PositiveInt(Element),
    #[serde(rename = "_valueString")]
    String(Element),
    #[serde(rename = "_valueTime")]
    Time(Element),
    #[serde(rename = "_valueUnsignedInt")]
    UnsignedInt(Element),
    #[serde(rename = "_valueUri")]
    Uri(Element),
    #[serde(rename = "_valueUrl")]
    Url(Element),
    #[serde(rename = "_valueUuid")]
    Uuid(Element),
}

impl_choice!(ExtensionValueElement {
    "_valueBase64Binary",
    "_valueBoolean",
    "_valueCanonical",
    "_valueCode",
    "_valueDate",
    "_valueDateTime",
    "_valueDecimal",
    "_valueId",
    "_valueInstant",
    "_valueInteger",
    "_valueInteger64",
    "_valueMarkdown",
    "_valueOid",
    "_valuePositiveInt",
    "_valueString",
    "_valueTime",
    "_valueUnsignedInt",
    "_valueUri",
    "_valueUrl",
    "_valueUuid",
});

impl From<bool> for ExtensionValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for ExtensionValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for ExtensionValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<String> for ExtensionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ExtensionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Coding> for ExtensionValue {
    fn from(value: Coding) -> Self {
        Self::Coding(value)
    }
}

impl From<CodeableConcept> for ExtensionValue {
    fn from(value: CodeableConcept) -> Self {
        Self::CodeableConcept(value)
    }
}

impl From<Reference> for ExtensionValue {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<Quantity> for ExtensionValue {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<Period> for ExtensionValue {
    fn from(value: Period) -> Self {
        Self::Period(value)
    }
}

impl From<Identifier> for ExtensionValue {
    fn from(value: Identifier) -> Self {
        Self::Identifier(value)
    }
}

fhir_builder! {
    /// Builder for [`Extension`]
    ExtensionBuilder => Extension {
        set set_url(url: String);
        choice set_value(value: ExtensionValue, clears value_element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::element::FhirElement;
    use serde_json::json;

    #[test]
    fn test_extension_value_key() {
        let ext = Extension::with_value("http://example.org/flag", true);
        assert_eq!(
            ext.to_json().unwrap(),
            json!({ "url": "http://example.org/flag", "valueBoolean": true })
        );
    }

    #[test]
    fn test_extension_primitive_shadow() {
        let ext = Extension::from_json(json!({
            "url": "http://example.org/name",
            "valueString": "x",
            "_valueString": {
                "extension": [{ "url": "http://example.org/lang", "valueCode": "en" }]
            }
        }))
        .unwrap();

        assert_eq!(ext.value, Some(ExtensionValue::String("x".to_string())));
        match &ext.value_element {
            Some(ExtensionValueElement::String(element)) => {
                assert_eq!(element.extension.as_ref().unwrap().len(), 1)
            }
            other => panic!("unexpected shadow {:?}", other),
        }

        let keys: Vec<_> = ext
            .to_json()
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["url", "valueString", "_valueString"]);
    }

    #[test]
    fn test_set_value_clears_shadow() {
        let mut ext = Extension::with_value("http://example.org/x", "a");
        ext.value_element = Some(ExtensionValueElement::String(Element::new()));

        ext.set_value(true);

        let json = ext.to_json().unwrap();
        assert_eq!(json, json!({ "url": "http://example.org/x", "valueBoolean": true }));
    }

    #[test]
    fn test_unmodelled_value_type_is_kept() {
        let source = json!({
            "url": "http://example.org/timing",
            "valueTiming": { "code": { "text": "BID" } }
        });
        let ext = Extension::from_json(source.clone()).unwrap();
        assert!(ext.value.is_none());
        assert_eq!(ext.to_json().unwrap(), source);
    }

    #[test]
    fn test_nested_extensions() {
        let ext = Extension::from_json(json!({
            "url": "http://example.org/complex",
            "extension": [
                { "url": "a", "valueInteger": 1 },
                { "url": "b", "valueDecimal": 2.5 }
            ]
        }))
        .unwrap();

        let nested = ext.extension.as_ref().unwrap();
        assert_eq!(nested[0].value, Some(ExtensionValue::Integer(1)));
        assert_eq!(nested[1].value, Some(ExtensionValue::Decimal(Decimal::new(25, 1))));
    }
}
