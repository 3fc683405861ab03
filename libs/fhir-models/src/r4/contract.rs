//! FHIR Contract model
//!
//! Legally enforceable, formally recorded unilateral or bilateral directive.
//! Term and content definition structures are kept as raw JSON.

use super::Resource;
use crate::common::datatypes::{
    Attachment, CodeableConcept, Coding, Identifier, Meta, Narrative, Period, Reference,
    Signature,
};
use crate::common::element::Element;
use crate::common::extension::Extension;
use crate::common::resource::ResourceTypeTag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR Contract resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Resource type - always "Contract"
    #[serde(default)]
    pub resource_type: ResourceTypeTag<Contract>,

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

    /// Contract number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    /// Basal definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_url", skip_serializing_if = "Option::is_none")]
    pub url_element: Option<Element>,

    /// Business edition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "_version", skip_serializing_if = "Option::is_none")]
    pub version_element: Option<Element>,

    /// amended | appended | cancelled | disputed | entered-in-error | executable +
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContractStatus>,
    #[serde(rename = "_status", skip_serializing_if = "Option::is_none")]
    pub status_element: Option<Element>,

    /// Negotiation status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_state: Option<CodeableConcept>,

    /// Source Contract Definition
    /// Reference(Contract)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantiates_canonical: Option<Reference>,

    /// External Contract Definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantiates_uri: Option<String>,
    #[serde(rename = "_instantiatesUri", skip_serializing_if = "Option::is_none")]
    pub instantiates_uri_element: Option<Element>,

    /// Content derived from the basal information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_derivative: Option<CodeableConcept>,

    /// When this Contract was issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(rename = "_issued", skip_serializing_if = "Option::is_none")]
    pub issued_element: Option<Element>,

    /// Effective time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies: Option<Period>,

    /// Contract cessation cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_type: Option<CodeableConcept>,

    /// Contract Target Entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<Reference>>,

    /// Authority under which this Contract has standing
    /// Reference(Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<Vec<Reference>>,

    /// A sphere of control governed by an authoritative jurisdiction, organization, or person
    /// Reference(Location)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<Reference>>,

    /// Specific Location
    /// Reference(Location)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Vec<Reference>>,

    /// Computer friendly designation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_name", skip_serializing_if = "Option::is_none")]
    pub name_element: Option<Element>,

    /// Human Friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "_title", skip_serializing_if = "Option::is_none")]
    pub title_element: Option<Element>,

    /// Subordinate Friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "_subtitle", skip_serializing_if = "Option::is_none")]
    pub subtitle_element: Option<Element>,

    /// Acronym or short name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Vec<String>>,
    #[serde(rename = "_alias", skip_serializing_if = "Option::is_none")]
    pub alias_element: Option<Vec<Option<Element>>>,

    /// Source of Contract
    /// Reference(Patient | Practitioner | PractitionerRole | Organization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    /// Range of Legal Concerns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<CodeableConcept>,

    /// Focus of contract interest
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic: Option<ContractTopic>,

    /// Legal instrument category
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Subtype within the context of type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<Vec<CodeableConcept>>,

    /// Extra Information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_info: Option<Vec<Reference>>,

    /// Key event in Contract History
    /// Reference(Provenance)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_history: Option<Vec<Reference>>,

    /// Contract Signatory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<Vec<ContractSigner>>,

    /// Contract Friendly Language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly: Option<Vec<ContractFriendly>>,

    /// Contract Legal Language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal: Option<Vec<ContractLegal>>,

    /// Computable Contract Language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<Vec<ContractRule>>,

    /// Binding Contract
    #[serde(
        flatten,
        deserialize_with = "crate::common::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub legally_binding: Option<ContractLegallyBinding>,

    /// Content beyond the modelled fields (contentDefinition, term, ...)
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl_domain_resource!(Contract, "Contract", Resource);

/// Contract.topic[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContractTopic {
    #[serde(rename = "topicCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "topicReference")]
    Reference(Reference),
}

impl_choice!(ContractTopic { "topicCodeableConcept", "topicReference" });

/// Contract.legallyBinding[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContractLegallyBinding {
    #[serde(rename = "legallyBindingAttachment")]
    Attachment(Attachment),
    /// Reference(Composition | DocumentReference | QuestionnaireResponse | Contract)
    #[serde(rename = "legallyBindingReference")]
    Reference(Reference),
}

impl_choice!(ContractLegallyBinding { "legallyBindingAttachment", "legallyBindingReference" });

/// Contract Signatory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSigner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Contract Signatory Role
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Coding>,

    /// Contract Signatory Party
    /// Reference(Organization | Patient | Practitioner | PractitionerRole | RelatedPerson)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<Reference>,

    /// Contract Documentation Signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Vec<Signature>>,
}

/// Declares a backbone element holding only a `content[x]` choice of
/// Attachment or Reference, plus its content enum and builder.
macro_rules! contract_content_element {
    (
        $(#[$doc:meta])*
        $name:ident, $content:ident, $builder:ident
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(skip_serializing_if = "Option::is_none")]
            pub id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub extension: Option<Vec<Extension>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub modifier_extension: Option<Vec<Extension>>,

            #[serde(
                flatten,
                deserialize_with = "crate::common::choice::deserialize",
                skip_serializing_if = "Option::is_none"
            )]
            pub content: Option<$content>,
        }

        impl $name {
            pub fn set_content(&mut self, content: impl Into<$content>) {
                self.content = Some(content.into());
            }
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum $content {
            #[serde(rename = "contentAttachment")]
            Attachment(Attachment),
            #[serde(rename = "contentReference")]
            Reference(Reference),
        }

        impl_choice!($content { "contentAttachment", "contentReference" });

        impl From<Attachment> for $content {
            fn from(value: Attachment) -> Self {
                Self::Attachment(value)
            }
        }

        impl From<Reference> for $content {
            fn from(value: Reference) -> Self {
                Self::Reference(value)
            }
        }

        impl_backbone_element!($name);

        fhir_builder! {
            $builder => $name {
                choice set_content(content: $content);
            }
        }
    };
}

contract_content_element!(
    /// Contract Friendly Language
    ContractFriendly,
    ContractFriendlyContent,
    ContractFriendlyBuilder
);

contract_content_element!(
    /// Contract Legal Language
    ContractLegal,
    ContractLegalContent,
    ContractLegalBuilder
);

contract_content_element!(
    /// Computable Contract Language
    ContractRule,
    ContractRuleContent,
    ContractRuleBuilder
);

impl_backbone_element!(ContractSigner);

impl Contract {
    pub fn set_topic(&mut self, topic: impl Into<ContractTopic>) {
        self.topic = Some(topic.into());
    }

    pub fn set_legally_binding(&mut self, legally_binding: impl Into<ContractLegallyBinding>) {
        self.legally_binding = Some(legally_binding.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractStatus {
    Amended,
    Appended,
    Cancelled,
    Disputed,
    EnteredInError,
    Executable,
    Executed,
    Negotiable,
    Offered,
    Policy,
    Rejected,
    Renewed,
    Revoked,
    Resolved,
    Terminated,
}

fhir_builder! {
    /// Builder for [`Contract`]
    ContractBuilder => Contract {
        add add_identifier(identifier: Identifier);
        set set_url(url: String);
        set set_version(version: String);
        set set_status(status: ContractStatus);
        set set_legal_state(legal_state: CodeableConcept);
        set set_instantiates_canonical(instantiates_canonical: Reference);
        set set_instantiates_uri(instantiates_uri: String);
        set set_content_derivative(content_derivative: CodeableConcept);
        set set_issued(issued: String);
        set set_applies(applies: Period);
        set set_expiration_type(expiration_type: CodeableConcept);
        add add_subject(subject: Reference);
        add add_authority(authority: Reference);
        add add_domain(domain: Reference);
        add add_site(site: Reference);
        set set_name(name: String);
        set set_title(title: String);
        set set_subtitle(subtitle: String);
        add add_alias(alias: String);
        set set_author(author: Reference);
        set set_scope(scope: CodeableConcept);
        choice set_topic(topic: ContractTopic);
        set set_type(type_: CodeableConcept);
        add add_sub_type(sub_type: CodeableConcept);
        add add_supporting_info(supporting_info: Reference);
        add add_relevant_history(relevant_history: Reference);
        add add_signer(signer: ContractSigner);
        add add_friendly(friendly: ContractFriendly);
        add add_legal(legal: ContractLegal);
        add add_rule(rule: ContractRule);
        choice set_legally_binding(legally_binding: ContractLegallyBinding);
    }
}

fhir_builder! {
    ContractSignerBuilder => ContractSigner {
        set set_type(type_: Coding);
        set set_party(party: Reference);
        add add_signature(signature: Signature);
    }
}
