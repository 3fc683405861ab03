//! FHIR R5 Observation model
//!
//! Adds `instantiates[x]`, `triggeredBy`, `bodyStructure`, a `normalValue` on
//! reference ranges and Attachment/Reference values to the R4 shape.

use super::Resource;
use crate::common::builder::set_choice;
use crate::common::datatypes::{
    Annotation, Attachment, CodeableConcept, Identifier, Meta, Narrative, Period, Quantity, Range,
    Ratio, Reference, SampledData,
};
use crate::common::element::Element;
use crate::common::extension::Extension;
use crate::common::resource::ResourceTypeTag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR Observation resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Resource type - always "Observation"
    #[serde(default)]
    pub resource_type: ResourceTypeTag<Observation>,

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

    /// Business Identifier for observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    /// Instantiates FHIR ObservationDefinition
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub instantiates: Option<ObservationInstantiates>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub instantiates_element: Option<ObservationInstantiatesElement>,

    /// Fulfills plan, proposal or order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    /// Triggering observation(s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<Vec<ObservationTriggeredBy>>,

    /// Part of referenced event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<Reference>>,

    /// registered | preliminary | final | amended +
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ObservationStatus>,
    #[serde(rename = "_status", skip_serializing_if = "Option::is_none")]
    pub status_element: Option<Element>,

    /// Classification of type of observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    /// Type of observation (code / type)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// Who and/or what the observation is about
    /// Reference(Patient | Group | Device | Location | Organization | Procedure | Practitioner | Medication | Substance | BiologicallyDerivedProduct | NutritionProduct)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// What the observation is about, when it is not about the subject of record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Vec<Reference>>,

    /// Healthcare event during which this observation is made
    /// Reference(Encounter)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    /// Clinically relevant time/time-period for observation
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective: Option<ObservationEffective>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_element: Option<ObservationEffectiveElement>,

    /// Date/Time this version was made available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(rename = "_issued", skip_serializing_if = "Option::is_none")]
    pub issued_element: Option<Element>,

    /// Who is responsible for the observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<Reference>>,

    /// Actual result
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<ObservationValue>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_element: Option<ObservationValueElement>,

    /// Why the result is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    /// High, low, normal, etc
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Vec<CodeableConcept>>,

    /// Comments about the observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    /// Observed body part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,

    /// Observed body structure
    /// Reference(BodyStructure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_structure: Option<Reference>,

    /// How it was done
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    /// Specimen used for this observation
    /// Reference(Specimen | Group)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Reference>,

    /// A reference to the device that generates the measurements or the device settings for the device
    /// Reference(Device | DeviceMetric)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Reference>,

    /// Provides guide for interpretation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Vec<ObservationReferenceRange>>,

    /// Related resource that belongs to the Observation group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_member: Option<Vec<Reference>>,

    /// Related resource from which the observation is made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Vec<Reference>>,

    /// Component results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Vec<ObservationComponent>>,

    /// Content beyond the modelled fields
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl_domain_resource!(Observation, "Observation", Resource);

impl Observation {
    /// Replace `value[x]`, dropping the `_value[x]` shadow of the previous variant
    pub fn set_value(&mut self, value: impl Into<ObservationValue>) {
        set_choice(&mut self.value, value.into(), &mut self.value_element);
    }

    pub fn set_effective(&mut self, effective: impl Into<ObservationEffective>) {
        set_choice(&mut self.effective, effective.into(), &mut self.effective_element);
    }

    pub fn set_instantiates(&mut self, instantiates: impl Into<ObservationInstantiates>) {
        set_choice(
            &mut self.instantiates,
            instantiates.into(),
            &mut self.instantiates_element,
        );
    }
}

/// Observation.instantiates[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservationInstantiates {
    #[serde(rename = "instantiatesCanonical")]
    Canonical(String),
    /// Reference(ObservationDefinition)
    #[serde(rename = "instantiatesReference")]
    Reference(Reference),
}

impl_choice!(ObservationInstantiates { "instantiatesCanonical", "instantiatesReference" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservationInstantiatesElement {
    #[serde(rename = "_instantiatesCanonical")]
    Canonical(Element),
}

impl_choice!(ObservationInstantiatesElement { "_instantiatesCanonical" });

/// Observation.effective[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservationEffective {
    #[serde(rename = "effectiveDateTime")]
    DateTime(String),
    #[serde(rename = "effectivePeriod")]
    Period(Period),
    #[serde(rename = "effectiveInstant")]
    Instant(String),
}

impl_choice!(ObservationEffective { "effectiveDateTime", "effectivePeriod", "effectiveInstant" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservationEffectiveElement {
    #[serde(rename = "_effectiveDateTime")]
    DateTime(Element),
    #[serde(rename = "_effectiveInstant")]
    Instant(Element),
}

impl_choice!(ObservationEffectiveElement { "_effectiveDateTime", "_effectiveInstant" });

impl From<Period> for ObservationEffective {
    fn from(value: Period) -> Self {
        Self::Period(value)
    }
}

/// Observation.value[x] and Observation.component.value[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservationValue {
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueInteger")]
    Integer(i32),
    #[serde(rename = "valueRange")]
    Range(Range),
    #[serde(rename = "valueRatio")]
    Ratio(Ratio),
    #[serde(rename = "valueSampledData")]
    SampledData(SampledData),
    #[serde(rename = "valueTime")]
    Time(String),
    #[serde(rename = "valueDateTime")]
    DateTime(String),
    #[serde(rename = "valuePeriod")]
    Period(Period),
    #[serde(rename = "valueAttachment")]
    Attachment(Attachment),
    /// Reference(MolecularSequence)
    #[serde(rename = "valueReference")]
    Reference(Reference),
}

impl_choice!(ObservationValue {
    "valueQuantity",
    "valueCodeableConcept",
    "valueString",
    "valueBoolean",
    "valueInteger",
    "valueRange",
    "valueRatio",
    "valueSampledData",
    "valueTime",
    "valueDateTime",
    "valuePeriod",
    "valueAttachment",
    "valueReference",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservationValueElement {
    #[serde(rename = "_valueString")]
    String(Element),
    #[serde(rename = "_valueBoolean")]
    Boolean(Element),
    #[serde(rename = "_valueInteger")]
    Integer(Element),
    #[serde(rename = "_valueTime")]
    Time(Element),
    #[serde(rename = "_valueDateTime")]
    DateTime(Element),
}

impl_choice!(ObservationValueElement {
    "_valueString",
    "_valueBoolean",
    "_valueInteger",
    "_valueTime",
    "_valueDateTime",
});

impl From<SampledData> for ObservationValue {
    fn from(value: SampledData) -> Self {
        Self::SampledData(value)
    }
}

impl From<Quantity> for ObservationValue {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<CodeableConcept> for ObservationValue {
    fn from(value: CodeableConcept) -> Self {
        Self::CodeableConcept(value)
    }
}

impl From<bool> for ObservationValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for ObservationValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for ObservationValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ObservationValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Attachment> for ObservationValue {
    fn from(value: Attachment) -> Self {
        Self::Attachment(value)
    }
}

/// Triggering observation(s)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationTriggeredBy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Triggering observation
    /// Reference(Observation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<Reference>,

    /// reflex | repeat | re-run
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<TriggeredByType>,
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_element: Option<Element>,

    /// Reason that the observation was triggered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "_reason", skip_serializing_if = "Option::is_none")]
    pub reason_element: Option<Element>,
}

/// Provides guide for interpretation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationReferenceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Low Range, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    /// High Range, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,

    /// Normal value, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_value: Option<CodeableConcept>,

    /// Reference range qualifier
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Reference range population
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<Vec<CodeableConcept>>,

    /// Applicable age range, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Range>,

    /// Text based reference range in an observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "_text", skip_serializing_if = "Option::is_none")]
    pub text_element: Option<Element>,
}

/// Component results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Type of component observation (code / type)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// Actual component result
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<ObservationValue>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_element: Option<ObservationValueElement>,

    /// Why the component result value is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    /// High, low, normal, etc
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Vec<CodeableConcept>>,

    /// Provides guide for interpretation of component result value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Vec<ObservationReferenceRange>>,
}

impl_backbone_element!(
    ObservationTriggeredBy,
    ObservationReferenceRange,
    ObservationComponent,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Cancelled,
    EnteredInError,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggeredByType {
    Reflex,
    Repeat,
    ReRun,
}

fhir_builder! {
    /// Builder for [`Observation`]
    ObservationBuilder => Observation {
        add add_identifier(identifier: Identifier);
        choice set_instantiates(instantiates: ObservationInstantiates, clears instantiates_element);
        add add_based_on(based_on: Reference);
        add add_triggered_by(triggered_by: ObservationTriggeredBy);
        add add_part_of(part_of: Reference);
        set set_status(status: ObservationStatus);
        add add_category(category: CodeableConcept);
        set set_code(code: CodeableConcept);
        set set_subject(subject: Reference);
        add add_focus(focus: Reference);
        set set_encounter(encounter: Reference);
        choice set_effective(effective: ObservationEffective, clears effective_element);
        set set_issued(issued: String);
        add add_performer(performer: Reference);
        choice set_value(value: ObservationValue, clears value_element);
        set set_data_absent_reason(data_absent_reason: CodeableConcept);
        add add_interpretation(interpretation: CodeableConcept);
        add add_note(note: Annotation);
        set set_body_site(body_site: CodeableConcept);
        set set_body_structure(body_structure: Reference);
        set set_method(method: CodeableConcept);
        set set_specimen(specimen: Reference);
        set set_device(device: Reference);
        add add_reference_range(reference_range: ObservationReferenceRange);
        add add_has_member(has_member: Reference);
        add add_derived_from(derived_from: Reference);
        add add_component(component: ObservationComponent);
    }
}

fhir_builder! {
    ObservationTriggeredByBuilder => ObservationTriggeredBy {
        set set_observation(observation: Reference);
        set set_type(type_: TriggeredByType);
        set set_reason(reason: String);
    }
}

fhir_builder! {
    ObservationReferenceRangeBuilder => ObservationReferenceRange {
        set set_low(low: Quantity);
        set set_high(high: Quantity);
        set set_normal_value(normal_value: CodeableConcept);
        set set_type(type_: CodeableConcept);
        add add_applies_to(applies_to: CodeableConcept);
        set set_age(age: Range);
        set set_text(text: String);
    }
}

fhir_builder! {
    ObservationComponentBuilder => ObservationComponent {
        set set_code(code: CodeableConcept);
        choice set_value(value: ObservationValue, clears value_element);
        set set_data_absent_reason(data_absent_reason: CodeableConcept);
        add add_interpretation(interpretation: CodeableConcept);
        add add_reference_range(reference_range: ObservationReferenceRange);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::builder::ElementBuilder;
    use crate::common::element::FhirElement;
    use serde_json::json;

    #[test]
    fn test_r5_fields_in_order() {
        let observation = ObservationBuilder::new()
            .set_body_structure(Reference::to("BodyStructure/1"))
            .set_status(ObservationStatus::Final)
            .add_triggered_by(
                ObservationTriggeredByBuilder::new()
                    .set_observation(Reference::to("Observation/glucose"))
                    .set_type(TriggeredByType::ReRun)
                    .build(),
            )
            .set_instantiates(ObservationInstantiates::Canonical(
                "http://example.org/ObservationDefinition/x".to_string(),
            ))
            .build();

        let json = observation.to_json().unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "resourceType",
                "instantiatesCanonical",
                "triggeredBy",
                "status",
                "bodyStructure"
            ]
        );
        assert_eq!(json["triggeredBy"][0]["type"], json!("re-run"));
    }

    #[test]
    fn test_value_switch_to_attachment() {
        let mut observation = Observation::from_json(json!({
            "resourceType": "Observation",
            "valueString": "see report",
            "_valueString": { "id": "v" }
        }))
        .unwrap();

        observation.set_value(Attachment {
            url: Some("http://example.org/report.pdf".to_string()),
            ..Default::default()
        });

        assert_eq!(
            observation.to_json().unwrap(),
            json!({
                "resourceType": "Observation",
                "valueAttachment": { "url": "http://example.org/report.pdf" }
            })
        );
    }

    #[test]
    fn test_sampled_data_interval() {
        use crate::common::datatypes::SampledDataBuilder;
        use rust_decimal::Decimal;

        let sampled = SampledDataBuilder::new()
            .set_origin(Quantity::ucum(0, "mV"))
            .set_interval(Decimal::new(25, 1))
            .set_interval_unit("ms")
            .set_dimensions(2u32)
            .set_data("1 2 3 4")
            .build();
        let observation = ObservationBuilder::new()
            .set_status(ObservationStatus::Final)
            .set_value(sampled)
            .build();

        let json = observation.to_json().unwrap();
        assert_eq!(json["valueSampledData"]["interval"].to_string(), "2.5");
        assert_eq!(json["valueSampledData"]["intervalUnit"], json!("ms"));
        assert!(json["valueSampledData"].get("period").is_none());
        assert_eq!(Observation::from_json(json).unwrap(), observation);
    }
}
