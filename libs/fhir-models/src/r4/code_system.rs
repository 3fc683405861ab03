//! FHIR CodeSystem model
//!
//! Declares the existence of and describes a code system or code system supplement.

use super::Resource;
use crate::common::builder::set_choice;
use crate::common::datatypes::{
    CodeableConcept, Coding, ContactDetail, Identifier, Meta, Narrative, PublicationStatus,
    UsageContext,
};
use crate::common::element::Element;
use crate::common::extension::Extension;
use crate::common::resource::ResourceTypeTag;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR CodeSystem resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystem {
    /// Resource type - always "CodeSystem"
    #[serde(default)]
    pub resource_type: ResourceTypeTag<CodeSystem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<String>,
    #[serde(rename = "_implicitRules", skip_serializing_if = "Option::is_none")]
    pub implicit_rules_element: Option<Element>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "_language", skip_serializing_if = "Option::is_none")]
    pub language_element: Option<Element>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Resource>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Canonical identifier for this code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_url", skip_serializing_if = "Option::is_none")]
    pub url_element: Option<Element>,

    /// Additional identifier for the code system (business identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    /// Business version of the code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "_version", skip_serializing_if = "Option::is_none")]
    pub version_element: Option<Element>,

    /// Name for this code system (computer friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_name", skip_serializing_if = "Option::is_none")]
    pub name_element: Option<Element>,

    /// Name for this code system (human friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "_title", skip_serializing_if = "Option::is_none")]
    pub title_element: Option<Element>,

    /// draft | active | retired | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
    #[serde(rename = "_status", skip_serializing_if = "Option::is_none")]
    pub status_element: Option<Element>,

    /// For testing purposes, not real usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,
    #[serde(rename = "_experimental", skip_serializing_if = "Option::is_none")]
    pub experimental_element: Option<Element>,

    /// Date last changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "_date", skip_serializing_if = "Option::is_none")]
    pub date_element: Option<Element>,

    /// Name of the publisher (organization or individual)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(rename = "_publisher", skip_serializing_if = "Option::is_none")]
    pub publisher_element: Option<Element>,

    /// Contact details for the publisher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactDetail>>,

    /// Natural language description of the code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "_description", skip_serializing_if = "Option::is_none")]
    pub description_element: Option<Element>,

    /// The context that the content is intended to support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_context: Option<Vec<UsageContext>>,

    /// Intended jurisdiction for code system (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Vec<CodeableConcept>>,

    /// Why this code system is defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(rename = "_purpose", skip_serializing_if = "Option::is_none")]
    pub purpose_element: Option<Element>,

    /// Use and/or publishing restrictions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(rename = "_copyright", skip_serializing_if = "Option::is_none")]
    pub copyright_element: Option<Element>,

    /// If code comparison is case sensitive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(rename = "_caseSensitive", skip_serializing_if = "Option::is_none")]
    pub case_sensitive_element: Option<Element>,

    /// Canonical reference to the value set with entire code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<String>,
    #[serde(rename = "_valueSet", skip_serializing_if = "Option::is_none")]
    pub value_set_element: Option<Element>,

    /// grouped-by | is-a | part-of | classified-with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_meaning: Option<HierarchyMeaning>,
    #[serde(rename = "_hierarchyMeaning", skip_serializing_if = "Option::is_none")]
    pub hierarchy_meaning_element: Option<Element>,

    /// If code system defines a compositional grammar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compositional: Option<bool>,
    #[serde(rename = "_compositional", skip_serializing_if = "Option::is_none")]
    pub compositional_element: Option<Element>,

    /// If definitions are not stable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_needed: Option<bool>,
    #[serde(rename = "_versionNeeded", skip_serializing_if = "Option::is_none")]
    pub version_needed_element: Option<Element>,

    /// not-present | example | fragment | complete | supplement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<CodeSystemContentMode>,
    #[serde(rename = "_content", skip_serializing_if = "Option::is_none")]
    pub content_element: Option<Element>,

    /// Canonical URL of Code System this adds designations and properties to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplements: Option<String>,
    #[serde(rename = "_supplements", skip_serializing_if = "Option::is_none")]
    pub supplements_element: Option<Element>,

    /// Total concepts in the code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "_count", skip_serializing_if = "Option::is_none")]
    pub count_element: Option<Element>,

    /// Filter that can be used in a value set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<CodeSystemFilter>>,

    /// Additional information supplied about each concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Vec<CodeSystemProperty>>,

    /// Concepts in the code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<Vec<CodeSystemConcept>>,

    /// Content beyond the modelled fields
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl_domain_resource!(CodeSystem, "CodeSystem", Resource);

impl CodeSystem {
    /// Find a concept by code, searching nested concepts depth-first
    pub fn find_concept(&self, code: &str) -> Option<&CodeSystemConcept> {
        self.concept
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find_map(|c| c.find(code))
    }
}

/// Filter that can be used in a value set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Code that identifies the filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "_code", skip_serializing_if = "Option::is_none")]
    pub code_element: Option<Element>,

    /// How or why the filter is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "_description", skip_serializing_if = "Option::is_none")]
    pub description_element: Option<Element>,

    /// = | is-a | descendent-of | is-not-a | regex | in | not-in | generalizes | exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Vec<FilterOperator>>,
    #[serde(rename = "_operator", skip_serializing_if = "Option::is_none")]
    pub operator_element: Option<Vec<Option<Element>>>,

    /// What to use for the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "_value", skip_serializing_if = "Option::is_none")]
    pub value_element: Option<Element>,
}

/// Additional information supplied about each concept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Identifies the property on the concepts, and when referred to in operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "_code", skip_serializing_if = "Option::is_none")]
    pub code_element: Option<Element>,

    /// Formal identifier for the property
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "_uri", skip_serializing_if = "Option::is_none")]
    pub uri_element: Option<Element>,

    /// Why the property is defined, and/or what it conveys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "_description", skip_serializing_if = "Option::is_none")]
    pub description_element: Option<Element>,

    /// code | Coding | string | integer | boolean | dateTime | decimal
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<PropertyType>,
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_element: Option<Element>,
}

/// Concepts in the code system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Code that identifies concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "_code", skip_serializing_if = "Option::is_none")]
    pub code_element: Option<Element>,

    /// Text to display to the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(rename = "_display", skip_serializing_if = "Option::is_none")]
    pub display_element: Option<Element>,

    /// Formal definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(rename = "_definition", skip_serializing_if = "Option::is_none")]
    pub definition_element: Option<Element>,

    /// Additional representations for the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<Vec<CodeSystemConceptDesignation>>,

    /// Property value for the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Vec<CodeSystemConceptProperty>>,

    /// Child Concepts (is-a/contains/categorizes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<Vec<CodeSystemConcept>>,
}

impl CodeSystemConcept {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            display: Some(display.into()),
            ..Default::default()
        }
    }

    /// This concept or the first descendant with the given code
    pub fn find(&self, code: &str) -> Option<&CodeSystemConcept> {
        if self.code.as_deref() == Some(code) {
            return Some(self);
        }
        self.concept
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find_map(|c| c.find(code))
    }
}

/// Additional representations for the concept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemConceptDesignation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Human language of the designation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "_language", skip_serializing_if = "Option::is_none")]
    pub language_element: Option<Element>,

    /// Details how this designation would be used
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<Coding>,

    /// The text value for this designation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "_value", skip_serializing_if = "Option::is_none")]
    pub value_element: Option<Element>,
}

/// Property value for the concept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemConceptProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Reference to CodeSystem.property.code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "_code", skip_serializing_if = "Option::is_none")]
    pub code_element: Option<Element>,

    /// Value of the property for this concept
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<ConceptPropertyValue>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_element: Option<ConceptPropertyValueElement>,
}

impl CodeSystemConceptProperty {
    pub fn set_value(&mut self, value: impl Into<ConceptPropertyValue>) {
        set_choice(&mut self.value, value.into(), &mut self.value_element);
    }
}

/// CodeSystem.concept.property.value[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConceptPropertyValue {
    #[serde(rename = "valueCode")]
    Code(String),
    #[serde(rename = "valueCoding")]
    Coding(Coding),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueInteger")]
    Integer(i32),
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueDateTime")]
    DateTime(String),
    #[serde(rename = "valueDecimal", with = "crate::common::decimal")]
    Decimal(Decimal),
}

impl_choice!(ConceptPropertyValue {
    "valueCode",
    "valueCoding",
    "valueString",
    "valueInteger",
    "valueBoolean",
    "valueDateTime",
    "valueDecimal",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConceptPropertyValueElement {
    #[serde(rename = "_valueCode")]
    Code(Element),
    #[serde(rename = "_valueString")]
    String(Element),
    #[serde(rename = "_valueInteger")]
    Integer(Element),
    #[serde(rename = "_valueBoolean")]
    Boolean(Element),
    #[serde(rename = "_valueDateTime")]
    DateTime(Element),
    #[serde(rename = "_valueDecimal")]
    Decimal(Element),
}

impl_choice!(ConceptPropertyValueElement {
    "_valueCode",
    "_valueString",
    "_valueInteger",
    "_valueBoolean",
    "_valueDateTime",
    "_valueDecimal",
});

impl From<Coding> for ConceptPropertyValue {
    fn from(value: Coding) -> Self {
        Self::Coding(value)
    }
}

impl From<bool> for ConceptPropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl_backbone_element!(
    CodeSystemFilter,
    CodeSystemProperty,
    CodeSystemConcept,
    CodeSystemConceptDesignation,
    CodeSystemConceptProperty,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeSystemContentMode {
    NotPresent,
    Example,
    Fragment,
    Complete,
    Supplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HierarchyMeaning {
    GroupedBy,
    IsA,
    PartOf,
    ClassifiedWith,
}

/// Operators a code system filter supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Equal,
    IsA,
    DescendentOf,
    IsNotA,
    Regex,
    In,
    NotIn,
    Generalizes,
    Exists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "Coding")]
    Coding,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "dateTime")]
    DateTime,
    #[serde(rename = "decimal")]
    Decimal,
}

fhir_builder! {
    /// Builder for [`CodeSystem`]
    CodeSystemBuilder => CodeSystem {
        set set_url(url: String);
        add add_identifier(identifier: Identifier);
        set set_version(version: String);
        set set_name(name: String);
        set set_title(title: String);
        set set_status(status: PublicationStatus);
        set set_experimental(experimental: bool);
        set set_date(date: String);
        set set_publisher(publisher: String);
        add add_contact(contact: ContactDetail);
        set set_description(description: String);
        add add_use_context(use_context: UsageContext);
        add add_jurisdiction(jurisdiction: CodeableConcept);
        set set_purpose(purpose: String);
        set set_copyright(copyright: String);
        set set_case_sensitive(case_sensitive: bool);
        set set_value_set(value_set: String);
        set set_hierarchy_meaning(hierarchy_meaning: HierarchyMeaning);
        set set_compositional(compositional: bool);
        set set_version_needed(version_needed: bool);
        set set_content(content: CodeSystemContentMode);
        set set_supplements(supplements: String);
        set set_count(count: u32);
        add add_filter(filter: CodeSystemFilter);
        add add_property(property: CodeSystemProperty);
        add add_concept(concept: CodeSystemConcept);
    }
}

fhir_builder! {
    CodeSystemFilterBuilder => CodeSystemFilter {
        set set_code(code: String);
        set set_description(description: String);
        add add_operator(operator: FilterOperator);
        set set_value(value: String);
    }
}

fhir_builder! {
    CodeSystemPropertyBuilder => CodeSystemProperty {
        set set_code(code: String);
        set set_uri(uri: String);
        set set_description(description: String);
        set set_type(type_: PropertyType);
    }
}

fhir_builder! {
    CodeSystemConceptBuilder => CodeSystemConcept {
        set set_code(code: String);
        set set_display(display: String);
        set set_definition(definition: String);
        add add_designation(designation: CodeSystemConceptDesignation);
        add add_property(property: CodeSystemConceptProperty);
        add add_concept(concept: CodeSystemConcept);
    }
}

fhir_builder! {
    CodeSystemConceptDesignationBuilder => CodeSystemConceptDesignation {
        set set_language(language: String);
        set set_use(use_: Coding);
        set set_value(value: String);
    }
}

fhir_builder! {
    CodeSystemConceptPropertyBuilder => CodeSystemConceptProperty {
        set set_code(code: String);
        choice set_value(value: ConceptPropertyValue, clears value_element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::builder::ElementBuilder;
    use crate::common::element::FhirElement;
    use serde_json::json;

    #[test]
    fn test_filter_builder() {
        let filter = CodeSystemFilterBuilder::new()
            .set_code("is-a")
            .add_operator(FilterOperator::IsA)
            .build();

        assert_eq!(
            filter.to_json().unwrap(),
            json!({ "code": "is-a", "operator": ["is-a"] })
        );
    }

    #[test]
    fn test_filter_operator_codes() {
        let filter = CodeSystemFilterBuilder::new()
            .add_operator(FilterOperator::Equal)
            .add_operator(FilterOperator::DescendentOf)
            .add_operator(FilterOperator::NotIn)
            .build();

        assert_eq!(
            filter.to_json().unwrap()["operator"],
            json!(["=", "descendent-of", "not-in"])
        );
    }

    #[test]
    fn test_find_nested_concept() {
        let code_system = CodeSystemBuilder::new()
            .set_url("http://example.org/cs")
            .set_status(PublicationStatus::Active)
            .set_content(CodeSystemContentMode::Complete)
            .add_concept(
                CodeSystemConceptBuilder::new()
                    .set_code("parent")
                    .add_concept(CodeSystemConcept::new("child", "Child"))
                    .build(),
            )
            .build();

        assert_eq!(
            code_system.find_concept("child").and_then(|c| c.display.as_deref()),
            Some("Child")
        );
        assert!(code_system.find_concept("missing").is_none());
    }

    #[test]
    fn test_concept_property_value_choice() {
        let property = CodeSystemConceptPropertyBuilder::new()
            .set_code("parent")
            .set_value(ConceptPropertyValue::Code("A".to_string()))
            .with(|p| p.value_element = Some(ConceptPropertyValueElement::Code(Element::new())))
            .set_value(true)
            .build();

        assert_eq!(
            property.to_json().unwrap(),
            json!({ "code": "parent", "valueBoolean": true })
        );
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let source = json!({
            "resourceType": "CodeSystem",
            "id": "example",
            "url": "http://hl7.org/fhir/CodeSystem/example",
            "status": "draft",
            "caseSensitive": true,
            "content": "complete",
            "filter": [{ "code": "acme-plastic", "operator": ["="], "value": "true" }],
            "property": [{ "code": "parent", "type": "code" }],
            "concept": [{
                "code": "chol-mmol",
                "display": "SChol (mmol/L)",
                "designation": [{ "use": { "code": "internal-label" }, "value": "From ACME POC Testing" }],
                "property": [{ "code": "parent", "valueCode": "chol" }]
            }]
        });

        let code_system = CodeSystem::from_json(source.clone()).unwrap();
        assert_eq!(code_system.to_json().unwrap(), source);
    }
}
