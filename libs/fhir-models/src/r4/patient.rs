//! FHIR Patient model
//!
//! Demographics and other administrative information about an individual
//! receiving care. The shape is unchanged between R4, R4B and R5.

use super::Resource;
use crate::common::builder::set_choice;
use crate::common::datatypes::{
    Address, Attachment, CodeableConcept, ContactPoint, HumanName, Identifier, Meta, Narrative,
    Period, Reference,
};
use crate::common::element::Element;
use crate::common::extension::Extension;
use crate::common::resource::ResourceTypeTag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR Patient resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Resource type - always "Patient"
    #[serde(default)]
    pub resource_type: ResourceTypeTag<Patient>,

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

    /// Contained, inline Resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Resource>>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Extensions that cannot be ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// An identifier for this patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    /// Whether this patient's record is in active use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "_active", skip_serializing_if = "Option::is_none")]
    pub active_element: Option<Element>,

    /// A name associated with the patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<HumanName>>,

    /// A contact detail for the individual
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telecom: Option<Vec<ContactPoint>>,

    /// male | female | other | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,
    #[serde(rename = "_gender", skip_serializing_if = "Option::is_none")]
    pub gender_element: Option<Element>,

    /// The date of birth for the individual
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "_birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date_element: Option<Element>,

    /// Indicates if the individual is deceased or not
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub deceased: Option<PatientDeceased>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub deceased_element: Option<PatientDeceasedElement>,

    /// An address for the individual
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Vec<Address>>,

    /// Marital (civil) status of a patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<CodeableConcept>,

    /// Whether patient is part of a multiple birth
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub multiple_birth: Option<PatientMultipleBirth>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub multiple_birth_element: Option<PatientMultipleBirthElement>,

    /// Image of the patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<Attachment>>,

    /// A contact party (e.g. guardian, partner, friend) for the patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<PatientContact>>,

    /// A language which may be used to communicate with the patient about their health
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication: Option<Vec<PatientCommunication>>,

    /// Patient's nominated primary care provider
    /// Reference(Organization | Practitioner | PractitionerRole)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_practitioner: Option<Vec<Reference>>,

    /// Organization that is the custodian of the patient record
    /// Reference(Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managing_organization: Option<Reference>,

    /// Link to another patient resource that concerns the same actual person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<PatientLink>>,

    /// Content beyond the modelled fields
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl_domain_resource!(Patient, "Patient", Resource);

impl Patient {
    pub fn set_deceased(&mut self, deceased: impl Into<PatientDeceased>) {
        set_choice(&mut self.deceased, deceased.into(), &mut self.deceased_element);
    }

    pub fn set_multiple_birth(&mut self, multiple_birth: impl Into<PatientMultipleBirth>) {
        set_choice(
            &mut self.multiple_birth,
            multiple_birth.into(),
            &mut self.multiple_birth_element,
        );
    }

    /// The first name marked `official`, else the first name
    pub fn official_name(&self) -> Option<&HumanName> {
        let names = self.name.as_deref()?;
        names
            .iter()
            .find(|n| n.use_ == Some(crate::common::datatypes::NameUse::Official))
            .or_else(|| names.first())
    }
}

/// Patient.deceased[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatientDeceased {
    #[serde(rename = "deceasedBoolean")]
    Boolean(bool),
    #[serde(rename = "deceasedDateTime")]
    DateTime(String),
}

impl_choice!(PatientDeceased { "deceasedBoolean", "deceasedDateTime" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatientDeceasedElement {
    #[serde(rename = "_deceasedBoolean")]
    Boolean(Element),
    #[serde(rename = "_deceasedDateTime")]
    DateTime(Element),
}

impl_choice!(PatientDeceasedElement { "_deceasedBoolean", "_deceasedDateTime" });

impl From<bool> for PatientDeceased {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Patient.multipleBirth[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatientMultipleBirth {
    #[serde(rename = "multipleBirthBoolean")]
    Boolean(bool),
    #[serde(rename = "multipleBirthInteger")]
    Integer(i32),
}

impl_choice!(PatientMultipleBirth { "multipleBirthBoolean", "multipleBirthInteger" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatientMultipleBirthElement {
    #[serde(rename = "_multipleBirthBoolean")]
    Boolean(Element),
    #[serde(rename = "_multipleBirthInteger")]
    Integer(Element),
}

impl_choice!(PatientMultipleBirthElement { "_multipleBirthBoolean", "_multipleBirthInteger" });

impl From<bool> for PatientMultipleBirth {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for PatientMultipleBirth {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

/// A contact party (e.g. guardian, partner, friend) for the patient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// The kind of relationship
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Vec<CodeableConcept>>,

    /// A name associated with the contact person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<HumanName>,

    /// A contact detail for the person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telecom: Option<Vec<ContactPoint>>,

    /// Address for the contact person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// male | female | other | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,
    #[serde(rename = "_gender", skip_serializing_if = "Option::is_none")]
    pub gender_element: Option<Element>,

    /// Organization that is associated with the contact
    /// Reference(Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Reference>,

    /// The period during which this contact person or organization is valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// A language which may be used to communicate with the patient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCommunication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// The language which can be used to communicate with the patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<CodeableConcept>,

    /// Language preference indicator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
    #[serde(rename = "_preferred", skip_serializing_if = "Option::is_none")]
    pub preferred_element: Option<Element>,
}

/// Link to another patient resource that concerns the same actual person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// The other patient or related person resource that the link refers to
    /// Reference(Patient | RelatedPerson)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Reference>,

    /// replaced-by | replaces | refer | seealso
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<LinkType>,
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_element: Option<Element>,
}

impl_backbone_element!(PatientContact, PatientCommunication, PatientLink);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkType {
    ReplacedBy,
    Replaces,
    Refer,
    #[serde(rename = "seealso")]
    SeeAlso,
}

fhir_builder! {
    /// Builder for [`Patient`]
    PatientBuilder => Patient {
        add add_identifier(identifier: Identifier);
        set set_active(active: bool);
        add add_name(name: HumanName);
        add add_telecom(telecom: ContactPoint);
        set set_gender(gender: AdministrativeGender);
        set set_birth_date(birth_date: String);
        choice set_deceased(deceased: PatientDeceased, clears deceased_element);
        add add_address(address: Address);
        set set_marital_status(marital_status: CodeableConcept);
        choice set_multiple_birth(multiple_birth: PatientMultipleBirth, clears multiple_birth_element);
        add add_photo(photo: Attachment);
        add add_contact(contact: PatientContact);
        add add_communication(communication: PatientCommunication);
        add add_general_practitioner(general_practitioner: Reference);
        set set_managing_organization(managing_organization: Reference);
        add add_link(link: PatientLink);
    }
}

fhir_builder! {
    PatientContactBuilder => PatientContact {
        add add_relationship(relationship: CodeableConcept);
        set set_name(name: HumanName);
        add add_telecom(telecom: ContactPoint);
        set set_address(address: Address);
        set set_gender(gender: AdministrativeGender);
        set set_organization(organization: Reference);
        set set_period(period: Period);
    }
}

fhir_builder! {
    PatientCommunicationBuilder => PatientCommunication {
        set set_language(language: CodeableConcept);
        set set_preferred(preferred: bool);
    }
}

fhir_builder! {
    PatientLinkBuilder => PatientLink {
        set set_other(other: Reference);
        set set_type(type_: LinkType);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::builder::{DomainResourceBuilder, ElementBuilder};
    use crate::common::datatypes::HumanNameBuilder;
    use crate::common::element::FhirElement;
    use serde_json::json;

    #[test]
    fn test_patient_keys_in_fhir_order() {
        let patient = PatientBuilder::new()
            .set_birth_date("1974-12-25")
            .set_gender(AdministrativeGender::Male)
            .add_name(HumanNameBuilder::new().set_family("Chalmers").build())
            .set_active(true)
            .set_id("example")
            .build();

        let json = patient.to_json().unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["resourceType", "id", "active", "name", "gender", "birthDate"]
        );
    }

    #[test]
    fn test_birth_date_shadow_follows_value() {
        let source = json!({
            "resourceType": "Patient",
            "birthDate": "1974-12-25",
            "_birthDate": {
                "extension": [{
                    "url": "http://hl7.org/fhir/StructureDefinition/patient-birthTime",
                    "valueDateTime": "1974-12-25T14:35:45-05:00"
                }]
            }
        });

        let patient = Patient::from_json(source.clone()).unwrap();
        assert!(patient.birth_date_element.is_some());

        let json = patient.to_json().unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["resourceType", "birthDate", "_birthDate"]);
        assert_eq!(json, source);
    }

    #[test]
    fn test_deceased_choice_is_exclusive() {
        let mut patient = Patient::from_json(json!({
            "resourceType": "Patient",
            "deceasedDateTime": "2015-02-14T13:42:00+10:00",
            "_deceasedDateTime": { "id": "d1" }
        }))
        .unwrap();

        patient.set_deceased(true);

        let json = patient.to_json().unwrap();
        assert_eq!(json, json!({ "resourceType": "Patient", "deceasedBoolean": true }));
    }

    #[test]
    fn test_multiple_birth_integer() {
        let patient = PatientBuilder::new().set_multiple_birth(2).build();
        assert_eq!(
            patient.to_json().unwrap(),
            json!({ "resourceType": "Patient", "multipleBirthInteger": 2 })
        );
    }

    #[test]
    fn test_contact_and_link_backbones() {
        let patient = PatientBuilder::new()
            .add_contact(
                PatientContactBuilder::new()
                    .set_gender(AdministrativeGender::Female)
                    .set_organization(Reference::to("Organization/1"))
                    .build(),
            )
            .add_link(
                PatientLinkBuilder::new()
                    .set_other(Reference::to("Patient/pat2"))
                    .set_type(LinkType::SeeAlso)
                    .build(),
            )
            .build();

        let json = patient.to_json().unwrap();
        assert_eq!(json["contact"][0]["gender"], json!("female"));
        assert_eq!(json["link"][0]["type"], json!("seealso"));
    }

    #[test]
    fn test_contained_resources() {
        let inner = PatientBuilder::new().set_id("p1").build();
        let patient = PatientBuilder::new().add_contained(inner).build();

        let json = patient.to_json().unwrap();
        assert_eq!(json["contained"][0]["resourceType"], json!("Patient"));

        let back = Patient::from_json(json).unwrap();
        assert_eq!(back.contained.as_ref().unwrap()[0].id(), Some("p1"));
    }

    #[test]
    fn test_official_name() {
        let mut patient = Patient::default();
        assert!(patient.official_name().is_none());

        patient.name = Some(vec![
            HumanNameBuilder::new().set_family("Windsor").build(),
            HumanNameBuilder::new()
                .set_family("Chalmers")
                .set_use(crate::common::datatypes::NameUse::Official)
                .build(),
        ]);
        assert_eq!(
            patient.official_name().and_then(|n| n.family.as_deref()),
            Some("Chalmers")
        );
    }
}
