//! FHIR Observation model
//!
//! Measurements and simple assertions made about a patient, device or other subject.

use super::Resource;
use crate::common::builder::set_choice;
use crate::common::datatypes::{
    Annotation, CodeableConcept, Identifier, Meta, Narrative, Period, Quantity, Range, Ratio,
    Reference, SampledData,
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

    /// Fulfills plan, proposal or order
    /// Reference(CarePlan | DeviceRequest | ImmunizationRecommendation | MedicationRequest | NutritionOrder | ServiceRequest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    /// Part of referenced event
    /// Reference(MedicationAdministration | MedicationDispense | MedicationStatement | Procedure | Immunization | ImagingStudy)
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
    /// Reference(Patient | Group | Device | Location)
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
    /// Reference(Practitioner | PractitionerRole | Organization | CareTeam | Patient | RelatedPerson)
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

    /// High, low, normal, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Vec<CodeableConcept>>,

    /// Comments about the observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    /// Observed body part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,

    /// How it was done
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    /// Specimen used for this observation
    /// Reference(Specimen)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Reference>,

    /// (Measurement) Device
    /// Reference(Device | DeviceMetric)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Reference>,

    /// Provides guide for interpretation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Vec<ObservationReferenceRange>>,

    /// Related resource that belongs to the Observation group
    /// Reference(Observation | QuestionnaireResponse | MolecularSequence)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_member: Option<Vec<Reference>>,

    /// Related measurements the observation is made from
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
}

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

    /// Why the component result is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    /// High, low, normal, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Vec<CodeableConcept>>,

    /// Provides guide for interpretation of component result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Vec<ObservationReferenceRange>>,
}

impl_backbone_element!(ObservationReferenceRange, ObservationComponent);

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

fhir_builder! {
    /// Builder for [`Observation`]
    ObservationBuilder => Observation {
        add add_identifier(identifier: Identifier);
        add add_based_on(based_on: Reference);
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
    ObservationReferenceRangeBuilder => ObservationReferenceRange {
        set set_low(low: Quantity);
        set set_high(high: Quantity);
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
    use crate::common::datatypes::Coding;
    use crate::common::element::FhirElement;
    use crate::common::error::Error;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_value_choice_switch_drops_shadow() {
        let mut observation = Observation::from_json(json!({
            "resourceType": "Observation",
            "status": "final",
            "valueString": "positive",
            "_valueString": { "id": "v1" }
        }))
        .unwrap();

        observation.set_value(true);

        assert_eq!(
            observation.to_json().unwrap(),
            json!({ "resourceType": "Observation", "status": "final", "valueBoolean": true })
        );
    }

    #[test]
    fn test_blood_pressure_components() {
        let systolic = ObservationComponentBuilder::new()
            .set_code(CodeableConcept::from_coding(Coding::new("http://loinc.org", "8480-6")))
            .set_value(Quantity::ucum(107, "mm[Hg]"))
            .build();
        let diastolic = ObservationComponentBuilder::new()
            .set_code(CodeableConcept::from_coding(Coding::new("http://loinc.org", "8462-4")))
            .set_value(Quantity::ucum(60, "mm[Hg]"))
            .build();

        let observation = ObservationBuilder::new()
            .set_status(ObservationStatus::Final)
            .set_code(CodeableConcept::from_coding(Coding::new("http://loinc.org", "85354-9")))
            .set_effective(ObservationEffective::DateTime("2012-09-17".to_string()))
            .add_component(systolic)
            .add_component(diastolic)
            .build();

        let json = observation.to_json().unwrap();
        assert_eq!(json["effectiveDateTime"], json!("2012-09-17"));
        assert_eq!(json["component"][0]["valueQuantity"]["value"], json!(107));
        assert_eq!(json["component"][1]["code"]["coding"][0]["code"], json!("8462-4"));
    }

    #[test]
    fn test_sampled_data_component() {
        let source = json!({
            "resourceType": "Observation",
            "status": "final",
            "component": [{
                "code": { "coding": [{ "system": "urn:oid:2.16.840.1.113883.6.24", "code": "131329" }] },
                "valueSampledData": {
                    "origin": { "value": 2048 },
                    "period": 10,
                    "factor": 1.612,
                    "lowerLimit": -3300,
                    "upperLimit": 3300,
                    "dimensions": 1,
                    "data": "2041 2043 2037"
                }
            }]
        });

        let observation = Observation::from_json(source.clone()).unwrap();
        let component = &observation.component.as_ref().unwrap()[0];
        let Some(ObservationValue::SampledData(sampled)) = &component.value else {
            panic!("expected valueSampledData, got {:?}", component.value);
        };
        assert_eq!(sampled.factor, Some(Decimal::new(1612, 3)));
        assert_eq!(sampled.dimensions, Some(1));
        assert_eq!(sampled.samples(), vec!["2041", "2043", "2037"]);
        assert_eq!(observation.to_json().unwrap(), source);
    }

    #[test]
    fn test_malformed_choice_value_is_an_error() {
        let err = Observation::from_json(json!({
            "resourceType": "Observation",
            "status": "final",
            "valueQuantity": { "value": "oops" }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::SerializationError(_)));
        assert!(err.to_string().contains("valueQuantity"), "{err}");

        let err = ObservationComponent::from_json(json!({
            "valueQuantity": { "value": 1 },
            "valueString": "one"
        }))
        .unwrap_err();
        assert!(matches!(err, Error::SerializationError(_)));
    }

    #[test]
    fn test_status_codes() {
        let observation = ObservationBuilder::new()
            .set_status(ObservationStatus::EnteredInError)
            .build();
        assert_eq!(observation.to_json().unwrap()["status"], json!("entered-in-error"));
    }
}
