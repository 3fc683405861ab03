//! FHIR R5 Claim model
//!
//! Adds `traceNumber`, encounters, `diagnosisRelatedGroup`, `patientPaid`,
//! care team `specialty` and item taxes to the R4 shape; diagnosis loses
//! `packageCode`. `event`, `supportingInfo`, `procedure` and item `detail`
//! are kept as raw JSON.

use super::Resource;
use crate::common::builder::set_choice;
use crate::common::datatypes::{
    Address, CodeableConcept, CodeableReference, Identifier, Meta, Money, Narrative, Period,
    Quantity, Reference,
};
use crate::common::element::Element;
use crate::common::extension::Extension;
use crate::common::resource::ResourceTypeTag;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR Claim resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Resource type - always "Claim"
    #[serde(default)]
    pub resource_type: ResourceTypeTag<Claim>,

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

    /// Business Identifier for claim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    /// Number for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_number: Option<Vec<Identifier>>,

    /// active | cancelled | draft | entered-in-error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    #[serde(rename = "_status", skip_serializing_if = "Option::is_none")]
    pub status_element: Option<Element>,

    /// Category or discipline
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// More granular claim type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<CodeableConcept>,

    /// claim | preauthorization | predetermination
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<ClaimUse>,
    #[serde(rename = "_use", skip_serializing_if = "Option::is_none")]
    pub use_element: Option<Element>,

    /// The recipient of the products and services
    /// Reference(Patient)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Reference>,

    /// Relevant time frame for the claim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_period: Option<Period>,

    /// Resource creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(rename = "_created", skip_serializing_if = "Option::is_none")]
    pub created_element: Option<Element>,

    /// Author of the claim
    /// Reference(Practitioner | PractitionerRole)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterer: Option<Reference>,

    /// Target
    /// Reference(Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurer: Option<Reference>,

    /// Party responsible for the claim
    /// Reference(Practitioner | PractitionerRole | Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Reference>,

    /// Desired processing urgency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CodeableConcept>,

    /// For whom to reserve funds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds_reserve: Option<CodeableConcept>,

    /// Prior or corollary claims
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<ClaimRelated>>,

    /// Prescription authorizing services and products
    /// Reference(DeviceRequest | MedicationRequest | VisionPrescription)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<Reference>,

    /// Original prescription if superseded by fulfiller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_prescription: Option<Reference>,

    /// Recipient of benefits payable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee: Option<ClaimPayee>,

    /// Treatment referral
    /// Reference(ServiceRequest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral: Option<Reference>,

    /// Encounters associated with the listed treatments
    /// Reference(Encounter)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Vec<Reference>>,

    /// Servicing location
    /// Reference(Location | Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<Reference>,

    /// Package billing code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_related_group: Option<CodeableConcept>,

    /// Members of the care team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_team: Option<Vec<ClaimCareTeam>>,

    /// Pertinent diagnosis information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Vec<ClaimDiagnosis>>,

    /// Patient insurance information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Vec<ClaimInsurance>>,

    /// Details of the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accident: Option<ClaimAccident>,

    /// Paid by the patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_paid: Option<Money>,

    /// Product or service provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<ClaimItem>>,

    /// Total claim cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Money>,

    /// Content beyond the modelled fields
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl_domain_resource!(Claim, "Claim", Resource);

impl Claim {
    /// Sum of `item.net` values sharing the first item's currency
    pub fn item_net_total(&self) -> Option<Money> {
        let items = self.item.as_deref()?;
        let mut nets = items.iter().filter_map(|i| i.net.as_ref());
        let first = nets.next()?;
        let currency = first.currency.clone();
        let mut total = first.value.unwrap_or_default();
        for net in nets.filter(|n| n.currency == currency) {
            total += net.value.unwrap_or_default();
        }
        Some(Money {
            value: Some(total),
            currency,
            ..Default::default()
        })
    }
}

/// Prior or corollary claims
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRelated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Reference to the related claim
    /// Reference(Claim)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<Reference>,

    /// How the reference claim is related
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<CodeableConcept>,

    /// File or case reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Identifier>,
}

/// Recipient of benefits payable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPayee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Category of recipient
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Recipient reference
    /// Reference(Practitioner | PractitionerRole | Organization | Patient | RelatedPerson)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<Reference>,
}

/// Members of the care team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCareTeam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Order of care team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(rename = "_sequence", skip_serializing_if = "Option::is_none")]
    pub sequence_element: Option<Element>,

    /// Practitioner or organization
    /// Reference(Practitioner | PractitionerRole | Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Reference>,

    /// Indicator of the lead practitioner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<bool>,
    #[serde(rename = "_responsible", skip_serializing_if = "Option::is_none")]
    pub responsible_element: Option<Element>,

    /// Function within the team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodeableConcept>,

    /// Practitioner or provider specialization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<CodeableConcept>,
}

/// Pertinent diagnosis information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDiagnosis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Diagnosis instance identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(rename = "_sequence", skip_serializing_if = "Option::is_none")]
    pub sequence_element: Option<Element>,

    /// Nature of illness or problem
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub diagnosis: Option<ClaimDiagnosisDiagnosis>,

    /// Timing or nature of the diagnosis
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Vec<CodeableConcept>>,

    /// Present on admission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_admission: Option<CodeableConcept>,
}

/// Claim.diagnosis.diagnosis[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimDiagnosisDiagnosis {
    #[serde(rename = "diagnosisCodeableConcept")]
    CodeableConcept(CodeableConcept),
    /// Reference(Condition)
    #[serde(rename = "diagnosisReference")]
    Reference(Reference),
}

impl_choice!(ClaimDiagnosisDiagnosis { "diagnosisCodeableConcept", "diagnosisReference" });

impl From<CodeableConcept> for ClaimDiagnosisDiagnosis {
    fn from(value: CodeableConcept) -> Self {
        Self::CodeableConcept(value)
    }
}

impl From<Reference> for ClaimDiagnosisDiagnosis {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

/// Patient insurance information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInsurance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Insurance instance identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(rename = "_sequence", skip_serializing_if = "Option::is_none")]
    pub sequence_element: Option<Element>,

    /// Coverage to be used for adjudication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal: Option<bool>,
    #[serde(rename = "_focal", skip_serializing_if = "Option::is_none")]
    pub focal_element: Option<Element>,

    /// Pre-assigned Claim number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    /// Insurance information
    /// Reference(Coverage)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Reference>,

    /// Additional provider contract number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_arrangement: Option<String>,
    #[serde(rename = "_businessArrangement", skip_serializing_if = "Option::is_none")]
    pub business_arrangement_element: Option<Element>,

    /// Prior authorization reference number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_auth_ref: Option<Vec<String>>,
    #[serde(rename = "_preAuthRef", skip_serializing_if = "Option::is_none")]
    pub pre_auth_ref_element: Option<Vec<Option<Element>>>,

    /// Adjudication results
    /// Reference(ClaimResponse)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_response: Option<Reference>,
}

/// Details of the event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAccident {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// When the incident occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "_date", skip_serializing_if = "Option::is_none")]
    pub date_element: Option<Element>,

    /// The nature of the accident
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Where the event occurred
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<ClaimAccidentLocation>,
}

/// Claim.accident.location[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimAccidentLocation {
    #[serde(rename = "locationAddress")]
    Address(Address),
    /// Reference(Location)
    #[serde(rename = "locationReference")]
    Reference(Reference),
}

impl_choice!(ClaimAccidentLocation { "locationAddress", "locationReference" });

/// Product or service provided
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Item instance identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(rename = "_sequence", skip_serializing_if = "Option::is_none")]
    pub sequence_element: Option<Element>,

    /// Number for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_number: Option<Vec<Identifier>>,

    /// Applicable careTeam members
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_team_sequence: Option<Vec<u32>>,
    #[serde(rename = "_careTeamSequence", skip_serializing_if = "Option::is_none")]
    pub care_team_sequence_element: Option<Vec<Option<Element>>>,

    /// Applicable diagnoses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_sequence: Option<Vec<u32>>,
    #[serde(rename = "_diagnosisSequence", skip_serializing_if = "Option::is_none")]
    pub diagnosis_sequence_element: Option<Vec<Option<Element>>>,

    /// Applicable procedures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure_sequence: Option<Vec<u32>>,
    #[serde(rename = "_procedureSequence", skip_serializing_if = "Option::is_none")]
    pub procedure_sequence_element: Option<Vec<Option<Element>>>,

    /// Applicable exception and supporting information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_sequence: Option<Vec<u32>>,
    #[serde(rename = "_informationSequence", skip_serializing_if = "Option::is_none")]
    pub information_sequence_element: Option<Vec<Option<Element>>>,

    /// Revenue or cost center code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<CodeableConcept>,

    /// Benefit classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    /// Billing, service, product, or drug code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_or_service: Option<CodeableConcept>,

    /// End of a range of codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_or_service_end: Option<CodeableConcept>,

    /// Request or Referral for Service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Vec<Reference>>,

    /// Product or service billing modifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Vec<CodeableConcept>>,

    /// Program the product or service is provided under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_code: Option<Vec<CodeableConcept>>,

    /// Date or dates of service or product delivery
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub serviced: Option<ClaimItemServiced>,
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub serviced_element: Option<ClaimItemServicedElement>,

    /// Place of service or where product was supplied
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<ClaimItemLocation>,

    /// Paid by the patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_paid: Option<Money>,

    /// Count of products or services
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    /// Fee, charge or cost per item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,

    /// Price scaling factor
    #[serde(
        default,
        with = "crate::common::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub factor: Option<Decimal>,
    #[serde(rename = "_factor", skip_serializing_if = "Option::is_none")]
    pub factor_element: Option<Element>,

    /// Total tax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Money>,

    /// Total item cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<Money>,

    /// Unique device identifier
    /// Reference(Device)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udi: Option<Vec<Reference>>,

    /// Anatomical location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<Vec<ClaimItemBodySite>>,

    /// Encounters related to this billed item
    /// Reference(Encounter)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Vec<Reference>>,
}

/// Anatomical location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItemBodySite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Vec<CodeableReference>>,

    /// Sub-location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_site: Option<Vec<CodeableConcept>>,
}

impl ClaimItem {
    pub fn set_serviced(&mut self, serviced: impl Into<ClaimItemServiced>) {
        set_choice(&mut self.serviced, serviced.into(), &mut self.serviced_element);
    }
}

/// Claim.item.serviced[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimItemServiced {
    #[serde(rename = "servicedDate")]
    Date(String),
    #[serde(rename = "servicedPeriod")]
    Period(Period),
}

impl_choice!(ClaimItemServiced { "servicedDate", "servicedPeriod" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimItemServicedElement {
    #[serde(rename = "_servicedDate")]
    Date(Element),
}

impl_choice!(ClaimItemServicedElement { "_servicedDate" });

/// Claim.item.location[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimItemLocation {
    #[serde(rename = "locationCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "locationAddress")]
    Address(Address),
    /// Reference(Location)
    #[serde(rename = "locationReference")]
    Reference(Reference),
}

impl_choice!(ClaimItemLocation {
    "locationCodeableConcept",
    "locationAddress",
    "locationReference",
});

impl_backbone_element!(
    ClaimRelated,
    ClaimPayee,
    ClaimCareTeam,
    ClaimDiagnosis,
    ClaimInsurance,
    ClaimAccident,
    ClaimItem,
    ClaimItemBodySite,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStatus {
    Active,
    Cancelled,
    Draft,
    EnteredInError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimUse {
    Claim,
    Preauthorization,
    Predetermination,
}

fhir_builder! {
    /// Builder for [`Claim`]
    ClaimBuilder => Claim {
        add add_identifier(identifier: Identifier);
        add add_trace_number(trace_number: Identifier);
        set set_status(status: ClaimStatus);
        set set_type(type_: CodeableConcept);
        set set_sub_type(sub_type: CodeableConcept);
        set set_use(use_: ClaimUse);
        set set_patient(patient: Reference);
        set set_billable_period(billable_period: Period);
        set set_created(created: String);
        set set_enterer(enterer: Reference);
        set set_insurer(insurer: Reference);
        set set_provider(provider: Reference);
        set set_priority(priority: CodeableConcept);
        set set_funds_reserve(funds_reserve: CodeableConcept);
        add add_related(related: ClaimRelated);
        set set_prescription(prescription: Reference);
        set set_original_prescription(original_prescription: Reference);
        set set_payee(payee: ClaimPayee);
        set set_referral(referral: Reference);
        add add_encounter(encounter: Reference);
        set set_facility(facility: Reference);
        set set_diagnosis_related_group(diagnosis_related_group: CodeableConcept);
        add add_care_team(care_team: ClaimCareTeam);
        add add_diagnosis(diagnosis: ClaimDiagnosis);
        add add_insurance(insurance: ClaimInsurance);
        set set_accident(accident: ClaimAccident);
        set set_patient_paid(patient_paid: Money);
        add add_item(item: ClaimItem);
        set set_total(total: Money);
    }
}

fhir_builder! {
    ClaimItemBodySiteBuilder => ClaimItemBodySite {
        add add_site(site: CodeableReference);
        add add_sub_site(sub_site: CodeableConcept);
    }
}

fhir_builder! {
    ClaimRelatedBuilder => ClaimRelated {
        set set_claim(claim: Reference);
        set set_relationship(relationship: CodeableConcept);
        set set_reference(reference: Identifier);
    }
}

fhir_builder! {
    ClaimPayeeBuilder => ClaimPayee {
        set set_type(type_: CodeableConcept);
        set set_party(party: Reference);
    }
}

fhir_builder! {
    ClaimCareTeamBuilder => ClaimCareTeam {
        set set_sequence(sequence: u32);
        set set_provider(provider: Reference);
        set set_responsible(responsible: bool);
        set set_role(role: CodeableConcept);
        set set_specialty(specialty: CodeableConcept);
    }
}

fhir_builder! {
    ClaimDiagnosisBuilder => ClaimDiagnosis {
        set set_sequence(sequence: u32);
        choice set_diagnosis(diagnosis: ClaimDiagnosisDiagnosis);
        add add_type(type_: CodeableConcept);
        set set_on_admission(on_admission: CodeableConcept);
    }
}

fhir_builder! {
    ClaimInsuranceBuilder => ClaimInsurance {
        set set_sequence(sequence: u32);
        set set_focal(focal: bool);
        set set_identifier(identifier: Identifier);
        set set_coverage(coverage: Reference);
        set set_business_arrangement(business_arrangement: String);
        add add_pre_auth_ref(pre_auth_ref: String);
        set set_claim_response(claim_response: Reference);
    }
}

fhir_builder! {
    ClaimAccidentBuilder => ClaimAccident {
        set set_date(date: String);
        set set_type(type_: CodeableConcept);
        choice set_location(location: ClaimAccidentLocation);
    }
}

fhir_builder! {
    ClaimItemBuilder => ClaimItem {
        set set_sequence(sequence: u32);
        add add_trace_number(trace_number: Identifier);
        add add_care_team_sequence(care_team_sequence: u32);
        add add_diagnosis_sequence(diagnosis_sequence: u32);
        add add_procedure_sequence(procedure_sequence: u32);
        add add_information_sequence(information_sequence: u32);
        set set_revenue(revenue: CodeableConcept);
        set set_category(category: CodeableConcept);
        set set_product_or_service(product_or_service: CodeableConcept);
        set set_product_or_service_end(product_or_service_end: CodeableConcept);
        add add_request(request: Reference);
        add add_modifier(modifier: CodeableConcept);
        add add_program_code(program_code: CodeableConcept);
        choice set_serviced(serviced: ClaimItemServiced, clears serviced_element);
        choice set_location(location: ClaimItemLocation);
        set set_patient_paid(patient_paid: Money);
        set set_quantity(quantity: Quantity);
        set set_unit_price(unit_price: Money);
        set set_factor(factor: Decimal);
        set set_tax(tax: Money);
        set set_net(net: Money);
        add add_udi(udi: Reference);
        add add_body_site(body_site: ClaimItemBodySite);
        add add_encounter(encounter: Reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::builder::ElementBuilder;
    use crate::common::datatypes::MoneyBuilder;
    use crate::common::element::FhirElement;
    use serde_json::json;

    #[test]
    fn test_care_team_specialty() {
        let care_team = ClaimCareTeamBuilder::new()
            .set_sequence(1u32)
            .set_provider(Reference::to("Practitioner/1"))
            .set_specialty(CodeableConcept::from_text("dentistry"))
            .build();

        assert_eq!(
            care_team.to_json().unwrap(),
            json!({
                "sequence": 1,
                "provider": { "reference": "Practitioner/1" },
                "specialty": { "text": "dentistry" }
            })
        );
    }

    #[test]
    fn test_package_code_is_not_modelled() {
        let diagnosis = ClaimDiagnosis::from_json(json!({
            "sequence": 1,
            "diagnosisReference": { "reference": "Condition/1" },
            "packageCode": { "text": "400" }
        }))
        .unwrap();

        assert_eq!(
            diagnosis.to_json().unwrap(),
            json!({ "sequence": 1, "diagnosisReference": { "reference": "Condition/1" } })
        );
    }

    #[test]
    fn test_trace_number_and_tax() {
        let claim = ClaimBuilder::new()
            .add_identifier(Identifier::new("http://happyvalley.com/claim", "12346"))
            .add_trace_number(Identifier::new("http://trace.org", "T-1"))
            .set_status(ClaimStatus::Active)
            .add_item(
                ClaimItemBuilder::new()
                    .set_sequence(1u32)
                    .set_tax(
                        MoneyBuilder::new()
                            .set_value(Decimal::new(65, 1))
                            .set_currency("USD")
                            .build(),
                    )
                    .set_net(MoneyBuilder::new().set_value(100).set_currency("USD").build())
                    .build(),
            )
            .build();

        let json = claim.to_json().unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["resourceType", "identifier", "traceNumber", "status", "item"]
        );
        assert_eq!(json["item"][0]["tax"]["value"], json!(6.5));
        assert_eq!(claim.item_net_total().and_then(|m| m.value), Some(Decimal::from(100)));
    }
}
