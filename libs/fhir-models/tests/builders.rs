use fhirkit_models::{
    Annotation, AttachmentBuilder, BackboneElementBuilder, CodeableConcept, Coding,
    DomainResourceBuilder, ElementBuilder, Extension, FhirElement, HasIdAndExtensions,
    HasModifierExtensions, MetaBuilder, Narrative, Reference,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn code_system_filter_builder() {
    use fhirkit_models::r4::{CodeSystemFilterBuilder, FilterOperator};

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
fn contract_legal_content_keeps_last_variant() {
    use fhirkit_models::r4::ContractLegalBuilder;

    let legal = ContractLegalBuilder::new()
        .set_content(AttachmentBuilder::new().set_title("Signed copy").build())
        .set_content(Reference::to("Composition/legal"))
        .build();

    let output = legal.to_json().unwrap();
    let object = output.as_object().unwrap();
    assert!(object.contains_key("contentReference"));
    assert!(!object.contains_key("contentAttachment"));
}

#[test]
fn notes_are_appended_in_call_order() {
    use fhirkit_models::r4::ObservationBuilder;

    let observation = ObservationBuilder::new()
        .add_note(Annotation::new("n1"))
        .add_note(Annotation::new("n2"))
        .build();

    assert_eq!(
        observation.to_json().unwrap()["note"],
        json!([{ "text": "n1" }, { "text": "n2" }])
    );
}

#[test]
fn builders_do_not_share_lists() {
    use fhirkit_models::r4::ObservationBuilder;

    let first = ObservationBuilder::new().add_note(Annotation::new("a")).build();
    let second = ObservationBuilder::new().build();

    assert_eq!(first.note.as_ref().map(Vec::len), Some(1));
    assert!(second.note.is_none());
}

#[test]
fn observation_value_choice_is_exclusive() {
    use fhirkit_models::r4::{ObservationBuilder, ObservationValue, ObservationValueElement};
    use fhirkit_models::Element;

    let observation = ObservationBuilder::new()
        .set_value(ObservationValue::String("positive".to_string()))
        .with(|o| {
            o.value_element = Some(ObservationValueElement::String(Element::with_extension(
                Extension::new("http://example.org/ext"),
            )))
        })
        .set_value(true)
        .build();

    let output = observation.to_json().unwrap();
    let object = output.as_object().unwrap();
    assert_eq!(object.get("valueBoolean"), Some(&json!(true)));
    assert!(!object.contains_key("valueString"));
    assert!(!object.contains_key("_valueString"));
}

#[test]
fn shared_element_setters() {
    use fhirkit_models::r4::{PatientBuilder, PatientContactBuilder};

    let contact = PatientContactBuilder::new()
        .set_id("c1")
        .add_extension(Extension::with_value("http://example.org/a", "x"))
        .add_modifier_extension(Extension::with_value("http://example.org/m", true))
        .build();

    assert_eq!(contact.id(), Some("c1"));
    assert_eq!(contact.extension().len(), 1);
    assert_eq!(contact.modifier_extension().len(), 1);

    let patient = PatientBuilder::new()
        .set_meta(MetaBuilder::new().set_version_id("3").build())
        .set_implicit_rules("http://example.org/rules")
        .set_language("en-AU")
        .set_text(Narrative::generated("<div xmlns=\"http://www.w3.org/1999/xhtml\">x</div>"))
        .add_contact(contact)
        .build();

    let output = patient.to_json().unwrap();
    let keys: Vec<_> = output.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        vec!["resourceType", "meta", "implicitRules", "language", "text", "contact"]
    );
    assert_eq!(
        output["contact"][0],
        json!({
            "id": "c1",
            "extension": [{ "url": "http://example.org/a", "valueString": "x" }],
            "modifierExtension": [{ "url": "http://example.org/m", "valueBoolean": true }]
        })
    );
}

#[test]
fn builder_resumes_from_existing_model() {
    use fhirkit_models::r4::{Claim, ClaimBuilder, ClaimStatus};

    let claim = ClaimBuilder::new().set_status(ClaimStatus::Draft).build();
    let updated: Claim = ClaimBuilder::from(claim)
        .set_status(ClaimStatus::Active)
        .set_type(CodeableConcept::from_coding(Coding::new(
            "http://terminology.hl7.org/CodeSystem/claim-type",
            "oral",
        )))
        .build();

    assert_eq!(updated.status, Some(ClaimStatus::Active));
    assert!(updated.type_.is_some());
}

#[test]
fn r5_claim_builder_contains_r5_resources() {
    use fhirkit_models::r5::{ClaimBuilder, ObservationBuilder, Resource};

    let claim = ClaimBuilder::new()
        .add_contained(ObservationBuilder::new().set_id("o1").build())
        .build();

    let contained = claim.contained.as_ref().unwrap();
    assert!(matches!(contained[0], Resource::Observation(_)));
}
