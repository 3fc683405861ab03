use fhirkit_models::{Decimal, FhirElement};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::{fs::File, path::PathBuf};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(relative: &str) -> Value {
    let path = fixtures_root().join(relative);
    assert!(path.exists(), "fixture missing at {:?}", path);

    let file = File::open(&path).expect("failed to open fixture");
    serde_json::from_reader(file).expect("failed to parse fixture")
}

fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

#[test]
fn r4_patient_example_round_trips_exactly() {
    let source = load_fixture("r4/patient-example.json");
    let patient = fhirkit_models::r4::Patient::from_json(source.clone()).unwrap();

    assert_eq!(patient.gender, Some(fhirkit_models::r4::AdministrativeGender::Male));
    assert!(patient.birth_date_element.is_some());

    let output = patient.to_json().unwrap();
    assert_eq!(keys(&output), keys(&source));
    assert_eq!(output, source);
}

#[test]
fn r4_patient_nested_shadow_on_contact_name() {
    let source = load_fixture("r4/patient-example.json");
    let patient = fhirkit_models::r4::Patient::from_json(source).unwrap();

    let contact_name = patient.contact.as_ref().unwrap()[0].name.as_ref().unwrap();
    let family_ext = contact_name.family_element.as_ref().unwrap();
    assert_eq!(family_ext.extension.as_ref().unwrap().len(), 1);
}

#[test]
fn r4_observation_keys_and_model_round_trip() {
    use fhirkit_models::r4::{Observation, ObservationEffective, ObservationValue};

    let source = load_fixture("r4/observation-bp.json");
    let observation = Observation::from_json(source.clone()).unwrap();

    assert!(matches!(
        observation.effective,
        Some(ObservationEffective::DateTime(ref date)) if date == "2012-09-17"
    ));
    let components = observation.component.as_ref().unwrap();
    assert!(matches!(
        components[0].value,
        Some(ObservationValue::Quantity(ref q)) if q.value == Some(Decimal::from(107))
    ));

    let output = observation.to_json().unwrap();
    assert_eq!(keys(&output), keys(&source));
    assert_eq!(output, source);
}

#[test]
fn decimals_keep_their_written_precision() {
    let text = r#"{"resourceType":"Observation","status":"final","valueQuantity":{"value":1.50,"unit":"mg"},"component":[{"valueQuantity":{"value":107.0}},{"valueQuantity":{"value":0.0010}}]}"#;

    let observation = fhirkit_models::r4::Observation::from_json_str(text).unwrap();
    assert_eq!(observation.to_json_string().unwrap(), text);

    let value = observation.to_json().unwrap();
    let reparsed = fhirkit_models::r4::Observation::from_json(value).unwrap();
    assert_eq!(reparsed.to_json_string().unwrap(), text);
}

#[test]
fn malformed_choice_value_fails_decoding() {
    let err = fhirkit_models::r4::Observation::from_json(json!({
        "resourceType": "Observation",
        "status": "final",
        "component": [{ "valueQuantity": { "value": "oops" } }]
    }))
    .unwrap_err();

    assert!(matches!(err, fhirkit_models::Error::SerializationError(_)));
}

#[test]
fn r5_code_system_example_round_trips_exactly() {
    use fhirkit_models::r5::{CodeSystem, VersionAlgorithm};

    let source = load_fixture("r5/codesystem-example.json");
    let code_system = CodeSystem::from_json(source.clone()).unwrap();

    assert_eq!(
        code_system.version_algorithm,
        Some(VersionAlgorithm::String("date".to_string()))
    );
    assert!(code_system.find_concept("chol-mass").is_some());
    assert_eq!(code_system.to_json().unwrap(), source);
}

#[test]
fn same_document_decodes_under_each_version() {
    let source = load_fixture("r4/patient-example.json");

    let r4 = fhirkit_models::r4::Resource::from_json(source.clone()).unwrap();
    let r4b = fhirkit_models::r4b::Resource::from_json(source.clone()).unwrap();
    let r5 = fhirkit_models::r5::Resource::from_json(source.clone()).unwrap();

    assert_eq!(r4.to_json().unwrap(), source);
    assert_eq!(r4b.to_json().unwrap(), source);
    assert_eq!(r5.to_json().unwrap(), source);
}

#[test]
fn output_is_sparse() {
    let patient = fhirkit_models::r4::Patient::from_json(json!({
        "resourceType": "Patient",
        "name": [{ "family": "Doe" }]
    }))
    .unwrap();

    let output = patient.to_json_string().unwrap();
    assert!(!output.contains("null"));
    assert_eq!(output, r#"{"resourceType":"Patient","name":[{"family":"Doe"}]}"#);
}

#[test]
fn unknown_top_level_keys_survive_round_trip() {
    let source = json!({
        "resourceType": "Observation",
        "status": "final",
        "triggeredBy": [{ "observation": { "reference": "Observation/1" }, "type": "reflex" }]
    });

    let observation = fhirkit_models::r4::Observation::from_json(source.clone()).unwrap();
    assert_eq!(observation.to_json().unwrap(), source);
}

#[test]
fn pretty_output_parses_back() {
    let source = load_fixture("r4/patient-example.json");
    let patient = fhirkit_models::r4::Patient::from_json(source).unwrap();

    let pretty = patient.to_json_pretty().unwrap();
    assert!(pretty.starts_with("{\n  \"resourceType\": \"Patient\""));
    assert_eq!(
        fhirkit_models::r4::Patient::from_json_str(&pretty).unwrap(),
        patient
    );
}
