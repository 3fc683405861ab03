//! FHIR general-purpose datatypes
//!
//! Shapes shared by R4, R4B and R5. Where a later release added fields, the
//! superset is modelled and the addition is noted on the field.

use super::element::Element;
use super::extension::Extension;
use super::resource::NamedResource;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Integer whose JSON form differs by release: a number for `unsignedInt`
/// in R4, a string for `integer64` in R5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Integer64 {
    Number(i64),
    String(String),
}

// Decoded through `Value`: buffered untagged content cannot carry
// arbitrary-precision numbers.
impl<'de> Deserialize<'de> for Integer64 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Number)
                .ok_or_else(|| D::Error::custom(format!("integer out of range: {n}"))),
            serde_json::Value::String(s) => Ok(Self::String(s)),
            other => Err(D::Error::custom(format!(
                "expected an integer or integer string, found {other}"
            ))),
        }
    }
}

impl Integer64 {
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.parse().ok(),
        }
    }
}

impl From<i64> for Integer64 {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// A reference to a code defined by a terminology system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Identity of the terminology system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "_system", skip_serializing_if = "Option::is_none")]
    pub system_element: Option<Element>,

    /// Version of the system - if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "_version", skip_serializing_if = "Option::is_none")]
    pub version_element: Option<Element>,

    /// Symbol in syntax defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "_code", skip_serializing_if = "Option::is_none")]
    pub code_element: Option<Element>,

    /// Representation defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(rename = "_display", skip_serializing_if = "Option::is_none")]
    pub display_element: Option<Element>,

    /// If this coding was chosen directly by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<bool>,
    #[serde(rename = "_userSelected", skip_serializing_if = "Option::is_none")]
    pub user_selected_element: Option<Element>,
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// Concept - reference to a terminology or just text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Code defined by a terminology system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,

    /// Plain text representation of the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "_text", skip_serializing_if = "Option::is_none")]
    pub text_element: Option<Element>,
}

impl CodeableConcept {
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: Some(vec![coding]),
            ..Default::default()
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// True if any coding matches `system` and `code`
    pub fn has_coding(&self, system: &str, code: &str) -> bool {
        self.coding.iter().flatten().any(|c| {
            c.system.as_deref() == Some(system) && c.code.as_deref() == Some(code)
        })
    }
}

impl From<Coding> for CodeableConcept {
    fn from(coding: Coding) -> Self {
        Self::from_coding(coding)
    }
}

/// Reference to a resource or a concept (R5)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Reference to a concept (by class)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<CodeableConcept>,

    /// Reference to a resource (by instance)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

/// A reference from one resource to another.
///
/// References are logical: they point at a target by URL or identifier and
/// never own it. Allowed target types are documented on each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Literal reference, Relative, internal or absolute URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "_reference", skip_serializing_if = "Option::is_none")]
    pub reference_element: Option<Element>,

    /// Type the reference refers to (e.g. "Patient")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_element: Option<Element>,

    /// Logical reference, when literal reference is not known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    /// Text alternative for the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(rename = "_display", skip_serializing_if = "Option::is_none")]
    pub display_element: Option<Element>,
}

impl Reference {
    /// Literal reference such as `Patient/123` or `urn:uuid:...`
    pub fn to(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }

    /// Relative reference `{ResourceType}/{id}` with `type` filled in
    pub fn typed<R: NamedResource>(id: impl AsRef<str>) -> Self {
        Self {
            reference: Some(format!("{}/{}", R::RESOURCE_TYPE, id.as_ref())),
            type_: Some(R::RESOURCE_TYPE.to_string()),
            ..Default::default()
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Resource type and id of a relative literal reference
    pub fn target(&self) -> Option<(&str, &str)> {
        let reference = self.reference.as_deref()?;
        let mut parts = reference.rsplitn(3, '/');
        let id = parts.next()?;
        let resource_type = parts.next()?;
        if resource_type.is_empty() || id.is_empty() {
            return None;
        }
        Some((resource_type, id))
    }
}

/// An identifier intended for computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// usual | official | temp | secondary | old (If known)
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<IdentifierUse>,
    #[serde(rename = "_use", skip_serializing_if = "Option::is_none")]
    pub use_element: Option<Element>,

    /// Description of identifier
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// The namespace for the identifier value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "_system", skip_serializing_if = "Option::is_none")]
    pub system_element: Option<Element>,

    /// The value that is unique
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "_value", skip_serializing_if = "Option::is_none")]
    pub value_element: Option<Element>,

    /// Time period when id is/was valid for use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Organization that issued id (may be just text)
    /// Reference(Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn new(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

/// Time range defined by start and end date/time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Starting time with inclusive boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(rename = "_start", skip_serializing_if = "Option::is_none")]
    pub start_element: Option<Element>,

    /// End time with inclusive boundary, if not ongoing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(rename = "_end", skip_serializing_if = "Option::is_none")]
    pub end_element: Option<Element>,
}

/// A measured or measurable amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Numerical value (with implicit precision)
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Decimal>,
    #[serde(rename = "_value", skip_serializing_if = "Option::is_none")]
    pub value_element: Option<Element>,

    /// < | <= | >= | > | ad - how to understand the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<QuantityComparator>,
    #[serde(rename = "_comparator", skip_serializing_if = "Option::is_none")]
    pub comparator_element: Option<Element>,

    /// Unit representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "_unit", skip_serializing_if = "Option::is_none")]
    pub unit_element: Option<Element>,

    /// System that defines coded unit form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "_system", skip_serializing_if = "Option::is_none")]
    pub system_element: Option<Element>,

    /// Coded form of the unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "_code", skip_serializing_if = "Option::is_none")]
    pub code_element: Option<Element>,
}

impl Quantity {
    /// Quantity with a UCUM unit
    pub fn ucum(value: impl Into<Decimal>, code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            value: Some(value.into()),
            unit: Some(code.clone()),
            system: Some("http://unitsofmeasure.org".to_string()),
            code: Some(code),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityComparator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    /// Sufficient to achieve this total quantity (R5)
    #[serde(rename = "ad")]
    Ad,
}

/// Set of values bounded by low and high
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Low limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    /// High limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,
}

/// A ratio of two Quantity values - a numerator and a denominator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Numerator value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator: Option<Quantity>,

    /// Denominator value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator: Option<Quantity>,
}

/// A series of measurements taken by a device
///
/// R4 spaces samples with `period`; R5 renamed it `interval` and added a
/// unit, a code map and offsets. Both shapes are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Zero value and units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Quantity>,

    /// Number of milliseconds between samples (R4)
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub period: Option<Decimal>,
    #[serde(rename = "_period", skip_serializing_if = "Option::is_none")]
    pub period_element: Option<Element>,

    /// Number of intervalUnits between samples (R5)
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<Decimal>,
    #[serde(rename = "_interval", skip_serializing_if = "Option::is_none")]
    pub interval_element: Option<Element>,

    /// Unit of the sampling interval (R5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_unit: Option<String>,
    #[serde(rename = "_intervalUnit", skip_serializing_if = "Option::is_none")]
    pub interval_unit_element: Option<Element>,

    /// Multiply data by this before adding to origin
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub factor: Option<Decimal>,
    #[serde(rename = "_factor", skip_serializing_if = "Option::is_none")]
    pub factor_element: Option<Element>,

    /// Lower limit of detection
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub lower_limit: Option<Decimal>,
    #[serde(rename = "_lowerLimit", skip_serializing_if = "Option::is_none")]
    pub lower_limit_element: Option<Element>,

    /// Upper limit of detection
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub upper_limit: Option<Decimal>,
    #[serde(rename = "_upperLimit", skip_serializing_if = "Option::is_none")]
    pub upper_limit_element: Option<Element>,

    /// Number of sample points at each time point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(rename = "_dimensions", skip_serializing_if = "Option::is_none")]
    pub dimensions_element: Option<Element>,

    /// Defines the codes used in the data (R5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_map: Option<String>,
    #[serde(rename = "_codeMap", skip_serializing_if = "Option::is_none")]
    pub code_map_element: Option<Element>,

    /// Offsets, typically in time, at which data values were taken (R5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsets: Option<String>,
    #[serde(rename = "_offsets", skip_serializing_if = "Option::is_none")]
    pub offsets_element: Option<Element>,

    /// Decimal values with spaces, or "E" | "U" | "L"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "_data", skip_serializing_if = "Option::is_none")]
    pub data_element: Option<Element>,
}

impl SampledData {
    /// Split `data` into its space-separated samples
    pub fn samples(&self) -> Vec<&str> {
        self.data
            .as_deref()
            .map(|data| data.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// An amount of economic utility in some recognized currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Money {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Numerical value (with implicit precision)
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Decimal>,
    #[serde(rename = "_value", skip_serializing_if = "Option::is_none")]
    pub value_element: Option<Element>,

    /// ISO 4217 Currency Code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "_currency", skip_serializing_if = "Option::is_none")]
    pub currency_element: Option<Element>,
}

/// Content in a format defined elsewhere
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Mime type of the content, with charset etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(rename = "_contentType", skip_serializing_if = "Option::is_none")]
    pub content_type_element: Option<Element>,

    /// Human language of the content (BCP-47)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "_language", skip_serializing_if = "Option::is_none")]
    pub language_element: Option<Element>,

    /// Data inline, base64ed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "_data", skip_serializing_if = "Option::is_none")]
    pub data_element: Option<Element>,

    /// Uri where the data can be found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_url", skip_serializing_if = "Option::is_none")]
    pub url_element: Option<Element>,

    /// Number of bytes of content (if url provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Integer64>,
    #[serde(rename = "_size", skip_serializing_if = "Option::is_none")]
    pub size_element: Option<Element>,

    /// Hash of the data (sha-1, base64ed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(rename = "_hash", skip_serializing_if = "Option::is_none")]
    pub hash_element: Option<Element>,

    /// Label to display in place of the data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "_title", skip_serializing_if = "Option::is_none")]
    pub title_element: Option<Element>,

    /// Date attachment was first created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,
    #[serde(rename = "_creation", skip_serializing_if = "Option::is_none")]
    pub creation_element: Option<Element>,

    /// Height of the image in pixels (R5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(rename = "_height", skip_serializing_if = "Option::is_none")]
    pub height_element: Option<Element>,

    /// Width of the image in pixels (R5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "_width", skip_serializing_if = "Option::is_none")]
    pub width_element: Option<Element>,

    /// Number of frames if > 1 (R5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<u32>,
    #[serde(rename = "_frames", skip_serializing_if = "Option::is_none")]
    pub frames_element: Option<Element>,

    /// Length in seconds (audio / video) (R5)
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Decimal>,
    #[serde(rename = "_duration", skip_serializing_if = "Option::is_none")]
    pub duration_element: Option<Element>,

    /// Number of printed pages (R5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(rename = "_pages", skip_serializing_if = "Option::is_none")]
    pub pages_element: Option<Element>,
}

/// Text node with attribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Individual responsible for the annotation
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<AnnotationAuthor>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_element: Option<AnnotationAuthorElement>,

    /// When the annotation was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "_time", skip_serializing_if = "Option::is_none")]
    pub time_element: Option<Element>,

    /// The annotation - text content (as markdown)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "_text", skip_serializing_if = "Option::is_none")]
    pub text_element: Option<Element>,
}

impl Annotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Annotation.author[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationAuthor {
    /// Reference(Practitioner | PractitionerRole | Patient | RelatedPerson | Organization)
    #[serde(rename = "authorReference")]
    Reference(Reference),
    #[serde(rename = "authorString")]
    String(String),
}

impl_choice!(AnnotationAuthor { "authorReference", "authorString" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationAuthorElement {
    #[serde(rename = "_authorString")]
    String(Element),
}

impl_choice!(AnnotationAuthorElement { "_authorString" });

/// Name of a human - parts and usage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// usual | official | temp | nickname | anonymous | old | maiden
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<NameUse>,
    #[serde(rename = "_use", skip_serializing_if = "Option::is_none")]
    pub use_element: Option<Element>,

    /// Text representation of the full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "_text", skip_serializing_if = "Option::is_none")]
    pub text_element: Option<Element>,

    /// Family name (often called 'Surname')
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(rename = "_family", skip_serializing_if = "Option::is_none")]
    pub family_element: Option<Element>,

    /// Given names (not always 'first'). Includes middle names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<Vec<String>>,
    #[serde(rename = "_given", skip_serializing_if = "Option::is_none")]
    pub given_element: Option<Vec<Option<Element>>>,

    /// Parts that come before the name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Vec<String>>,
    #[serde(rename = "_prefix", skip_serializing_if = "Option::is_none")]
    pub prefix_element: Option<Vec<Option<Element>>>,

    /// Parts that come after the name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<Vec<String>>,
    #[serde(rename = "_suffix", skip_serializing_if = "Option::is_none")]
    pub suffix_element: Option<Vec<Option<Element>>>,

    /// Time period when name was/is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameUse {
    Usual,
    Official,
    Temp,
    Nickname,
    Anonymous,
    Old,
    Maiden,
}

/// Details of a Technology mediated contact point (phone, fax, email, etc.)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// phone | fax | email | pager | url | sms | other
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<ContactPointSystem>,
    #[serde(rename = "_system", skip_serializing_if = "Option::is_none")]
    pub system_element: Option<Element>,

    /// The actual contact point details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "_value", skip_serializing_if = "Option::is_none")]
    pub value_element: Option<Element>,

    /// home | work | temp | old | mobile - purpose of this contact point
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<ContactPointUse>,
    #[serde(rename = "_use", skip_serializing_if = "Option::is_none")]
    pub use_element: Option<Element>,

    /// Specify preferred order of use (1 = highest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(rename = "_rank", skip_serializing_if = "Option::is_none")]
    pub rank_element: Option<Element>,

    /// Time period when the contact point was/is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointSystem {
    Phone,
    Fax,
    Email,
    Pager,
    Url,
    Sms,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointUse {
    Home,
    Work,
    Temp,
    Old,
    Mobile,
}

/// An address expressed using postal conventions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// home | work | temp | old | billing - purpose of this address
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<AddressUse>,
    #[serde(rename = "_use", skip_serializing_if = "Option::is_none")]
    pub use_element: Option<Element>,

    /// postal | physical | both
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<AddressType>,
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_element: Option<Element>,

    /// Text representation of the address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "_text", skip_serializing_if = "Option::is_none")]
    pub text_element: Option<Element>,

    /// Street name, number, direction & P.O. Box etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Vec<String>>,
    #[serde(rename = "_line", skip_serializing_if = "Option::is_none")]
    pub line_element: Option<Vec<Option<Element>>>,

    /// Name of city, town etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "_city", skip_serializing_if = "Option::is_none")]
    pub city_element: Option<Element>,

    /// District name (aka county)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(rename = "_district", skip_serializing_if = "Option::is_none")]
    pub district_element: Option<Element>,

    /// Sub-unit of country (abbreviations ok)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "_state", skip_serializing_if = "Option::is_none")]
    pub state_element: Option<Element>,

    /// Postal code for area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "_postalCode", skip_serializing_if = "Option::is_none")]
    pub postal_code_element: Option<Element>,

    /// Country (e.g. may be ISO 3166 2 or 3 letter code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "_country", skip_serializing_if = "Option::is_none")]
    pub country_element: Option<Element>,

    /// Time period when address was/is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUse {
    Home,
    Work,
    Temp,
    Old,
    Billing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Postal,
    Physical,
    Both,
}

/// Contact information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Name of an individual to contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_name", skip_serializing_if = "Option::is_none")]
    pub name_element: Option<Element>,

    /// Contact details for individual or organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telecom: Option<Vec<ContactPoint>>,
}

/// Describes the context of use for a conformance or knowledge resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Type of context being specified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Coding>,

    /// Value that defines the context
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<UsageContextValue>,
}

/// UsageContext.value[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UsageContextValue {
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueRange")]
    Range(Range),
    /// Reference(PlanDefinition | ResearchStudy | InsurancePlan | HealthcareService | Group | Location | Organization)
    #[serde(rename = "valueReference")]
    Reference(Reference),
}

impl_choice!(UsageContextValue {
    "valueCodeableConcept",
    "valueQuantity",
    "valueRange",
    "valueReference",
});

/// Human-readable summary of the resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// generated | extensions | additional | empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NarrativeStatus>,
    #[serde(rename = "_status", skip_serializing_if = "Option::is_none")]
    pub status_element: Option<Element>,

    /// Limited xhtml content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub div: Option<String>,
}

impl Narrative {
    pub fn generated(div: impl Into<String>) -> Self {
        Self {
            status: Some(NarrativeStatus::Generated),
            div: Some(div.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStatus {
    Generated,
    Extensions,
    Additional,
    Empty,
}

/// A digital signature along with supporting context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Indication of the reason the entity signed the object(s)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Vec<Coding>>,

    /// When the signature was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(rename = "_when", skip_serializing_if = "Option::is_none")]
    pub when_element: Option<Element>,

    /// Who signed
    /// Reference(Practitioner | PractitionerRole | RelatedPerson | Patient | Device | Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who: Option<Reference>,

    /// The party represented
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<Reference>,

    /// The technical format of the signed resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_format: Option<String>,
    #[serde(rename = "_targetFormat", skip_serializing_if = "Option::is_none")]
    pub target_format_element: Option<Element>,

    /// The technical format of the signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig_format: Option<String>,
    #[serde(rename = "_sigFormat", skip_serializing_if = "Option::is_none")]
    pub sig_format_element: Option<Element>,

    /// The actual signature content (XML DigSig. JWS, picture, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "_data", skip_serializing_if = "Option::is_none")]
    pub data_element: Option<Element>,
}

/// Lifecycle status of a canonical resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Draft,
    Active,
    Retired,
    Unknown,
}

/// Metadata about a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Version specific identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(rename = "_versionId", skip_serializing_if = "Option::is_none")]
    pub version_id_element: Option<Element>,

    /// When the resource version last changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(rename = "_lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated_element: Option<Element>,

    /// Identifies where the resource comes from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source_element: Option<Element>,

    /// Profiles this resource claims to conform to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,
    #[serde(rename = "_profile", skip_serializing_if = "Option::is_none")]
    pub profile_element: Option<Vec<Option<Element>>>,

    /// Security Labels applied to this resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<Coding>>,

    /// Tags applied to this resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<Coding>>,
}

impl_element!(
    Coding,
    CodeableConcept,
    CodeableReference,
    Reference,
    Identifier,
    Period,
    Quantity,
    Range,
    Ratio,
    SampledData,
    Money,
    Attachment,
    Annotation,
    HumanName,
    ContactPoint,
    Address,
    ContactDetail,
    UsageContext,
    Narrative,
    Signature,
    Meta,
);

fhir_builder! {
    CodingBuilder => Coding {
        set set_system(system: String);
        set set_version(version: String);
        set set_code(code: String);
        set set_display(display: String);
        set set_user_selected(user_selected: bool);
    }
}

fhir_builder! {
    CodeableConceptBuilder => CodeableConcept {
        add add_coding(coding: Coding);
        set set_text(text: String);
    }
}

fhir_builder! {
    CodeableReferenceBuilder => CodeableReference {
        set set_concept(concept: CodeableConcept);
        set set_reference(reference: Reference);
    }
}

fhir_builder! {
    ReferenceBuilder => Reference {
        set set_reference(reference: String);
        set set_type(type_: String);
        set set_identifier(identifier: Identifier);
        set set_display(display: String);
    }
}

fhir_builder! {
    IdentifierBuilder => Identifier {
        set set_use(use_: IdentifierUse);
        set set_type(type_: CodeableConcept);
        set set_system(system: String);
        set set_value(value: String);
        set set_period(period: Period);
        set set_assigner(assigner: Box<Reference>);
    }
}

fhir_builder! {
    PeriodBuilder => Period {
        set set_start(start: String);
        set set_end(end: String);
    }
}

fhir_builder! {
    QuantityBuilder => Quantity {
        set set_value(value: Decimal);
        set set_comparator(comparator: QuantityComparator);
        set set_unit(unit: String);
        set set_system(system: String);
        set set_code(code: String);
    }
}

fhir_builder! {
    RangeBuilder => Range {
        set set_low(low: Quantity);
        set set_high(high: Quantity);
    }
}

fhir_builder! {
    RatioBuilder => Ratio {
        set set_numerator(numerator: Quantity);
        set set_denominator(denominator: Quantity);
    }
}

fhir_builder! {
    SampledDataBuilder => SampledData {
        set set_origin(origin: Quantity);
        set set_period(period: Decimal);
        set set_interval(interval: Decimal);
        set set_interval_unit(interval_unit: String);
        set set_factor(factor: Decimal);
        set set_lower_limit(lower_limit: Decimal);
        set set_upper_limit(upper_limit: Decimal);
        set set_dimensions(dimensions: u32);
        set set_code_map(code_map: String);
        set set_offsets(offsets: String);
        set set_data(data: String);
    }
}

fhir_builder! {
    MoneyBuilder => Money {
        set set_value(value: Decimal);
        set set_currency(currency: String);
    }
}

fhir_builder! {
    AttachmentBuilder => Attachment {
        set set_content_type(content_type: String);
        set set_language(language: String);
        set set_data(data: String);
        set set_url(url: String);
        set set_size(size: Integer64);
        set set_hash(hash: String);
        set set_title(title: String);
        set set_creation(creation: String);
        set set_height(height: u32);
        set set_width(width: u32);
        set set_frames(frames: u32);
        set set_duration(duration: Decimal);
        set set_pages(pages: u32);
    }
}

fhir_builder! {
    AnnotationBuilder => Annotation {
        choice set_author(author: AnnotationAuthor, clears author_element);
        set set_time(time: String);
        set set_text(text: String);
    }
}

fhir_builder! {
    HumanNameBuilder => HumanName {
        set set_use(use_: NameUse);
        set set_text(text: String);
        set set_family(family: String);
        add add_given(given: String);
        add add_prefix(prefix: String);
        add add_suffix(suffix: String);
        set set_period(period: Period);
    }
}

fhir_builder! {
    ContactPointBuilder => ContactPoint {
        set set_system(system: ContactPointSystem);
        set set_value(value: String);
        set set_use(use_: ContactPointUse);
        set set_rank(rank: u32);
        set set_period(period: Period);
    }
}

fhir_builder! {
    AddressBuilder => Address {
        set set_use(use_: AddressUse);
        set set_type(type_: AddressType);
        set set_text(text: String);
        add add_line(line: String);
        set set_city(city: String);
        set set_district(district: String);
        set set_state(state: String);
        set set_postal_code(postal_code: String);
        set set_country(country: String);
        set set_period(period: Period);
    }
}

fhir_builder! {
    ContactDetailBuilder => ContactDetail {
        set set_name(name: String);
        add add_telecom(telecom: ContactPoint);
    }
}

fhir_builder! {
    UsageContextBuilder => UsageContext {
        set set_code(code: Coding);
        choice set_value(value: UsageContextValue);
    }
}

fhir_builder! {
    NarrativeBuilder => Narrative {
        set set_status(status: NarrativeStatus);
        set set_div(div: String);
    }
}

fhir_builder! {
    SignatureBuilder => Signature {
        add add_type(type_: Coding);
        set set_when(when: String);
        set set_who(who: Reference);
        set set_on_behalf_of(on_behalf_of: Reference);
        set set_target_format(target_format: String);
        set set_sig_format(sig_format: String);
        set set_data(data: String);
    }
}

fhir_builder! {
    MetaBuilder => Meta {
        set set_version_id(version_id: String);
        set set_last_updated(last_updated: String);
        set set_source(source: String);
        add add_profile(profile: String);
        add add_security(security: Coding);
        add add_tag(tag: Coding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::builder::ElementBuilder;
    use crate::common::element::FhirElement;
    use crate::common::operation_outcome::OperationOutcome;
    use serde_json::json;

    fn keys(value: &serde_json::Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_human_name_field_order() {
        let name = HumanNameBuilder::new()
            .set_period(Period::default())
            .add_given("Peter")
            .add_given("James")
            .set_family("Chalmers")
            .set_use(NameUse::Official)
            .build();

        let json = name.to_json().unwrap();
        assert_eq!(keys(&json), vec!["use", "family", "given", "period"]);
        assert_eq!(json["given"], json!(["Peter", "James"]));
    }

    #[test]
    fn test_primitive_list_shadow_with_nulls() {
        let source = json!({
            "given": ["Peter", "James"],
            "_given": [null, { "id": "g2" }]
        });

        let name = HumanName::from_json(source.clone()).unwrap();
        let shadows = name.given_element.as_ref().unwrap();
        assert!(shadows[0].is_none());
        assert_eq!(shadows[1].as_ref().unwrap().id.as_deref(), Some("g2"));
        assert_eq!(name.to_json().unwrap(), source);
    }

    #[test]
    fn test_shadow_emitted_only_when_defined() {
        let mut coding = Coding::new("http://loinc.org", "1234-5");
        assert_eq!(
            keys(&coding.to_json().unwrap()),
            vec!["system", "code"]
        );

        coding.code_element = Some(Element::with_extension(Extension::new(
            "http://example.org/ext",
        )));
        assert_eq!(
            keys(&coding.to_json().unwrap()),
            vec!["system", "code", "_code"]
        );
    }

    #[test]
    fn test_shadow_without_value() {
        let period = Period::from_json(json!({
            "_start": { "extension": [{ "url": "http://hl7.org/fhir/StructureDefinition/data-absent-reason", "valueCode": "unknown" }] }
        }))
        .unwrap();

        assert!(period.start.is_none());
        assert!(period.start_element.is_some());
    }

    #[test]
    fn test_reference_typed() {
        let reference = Reference::typed::<OperationOutcome>("abc").with_display("Outcome");
        assert_eq!(reference.reference.as_deref(), Some("OperationOutcome/abc"));
        assert_eq!(reference.type_.as_deref(), Some("OperationOutcome"));
        assert_eq!(reference.target(), Some(("OperationOutcome", "abc")));
    }

    #[test]
    fn test_reference_target_of_absolute_url() {
        let reference = Reference::to("http://example.org/fhir/Patient/123");
        assert_eq!(reference.target(), Some(("Patient", "123")));
        assert_eq!(Reference::to("urn:uuid:1234").target(), None);
    }

    #[test]
    fn test_annotation_author_choice() {
        let annotation = AnnotationBuilder::new()
            .set_author(AnnotationAuthor::String("Dr. Who".to_string()))
            .set_text("note")
            .with(|a| a.author_element = Some(AnnotationAuthorElement::String(Element::new())))
            .set_author(AnnotationAuthor::Reference(Reference::to("Practitioner/1")))
            .build();

        let json = annotation.to_json().unwrap();
        assert_eq!(
            json,
            json!({ "authorReference": { "reference": "Practitioner/1" }, "text": "note" })
        );
    }

    #[test]
    fn test_attachment_size_number_or_string() {
        let r4 = Attachment::from_json(json!({ "size": 1024 })).unwrap();
        assert_eq!(r4.size, Some(Integer64::Number(1024)));

        let r5 = Attachment::from_json(json!({ "size": "1024" })).unwrap();
        assert_eq!(r5.size.as_ref().and_then(Integer64::value), Some(1024));
        assert_eq!(r5.to_json().unwrap(), json!({ "size": "1024" }));
    }

    #[test]
    fn test_quantity_comparator_codes() {
        let quantity = QuantityBuilder::new()
            .set_value(Decimal::new(50, 1))
            .set_comparator(QuantityComparator::LessOrEqual)
            .build();
        assert_eq!(
            quantity.to_json().unwrap().to_string(),
            r#"{"value":5.0,"comparator":"<="}"#
        );
    }

    #[test]
    fn test_codeable_concept_has_coding() {
        let concept: CodeableConcept = Coding::new("http://loinc.org", "8867-4").into();
        assert!(concept.has_coding("http://loinc.org", "8867-4"));
        assert!(!concept.has_coding("http://snomed.info/sct", "8867-4"));
    }
}
