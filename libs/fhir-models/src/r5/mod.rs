//! FHIR R5 (5.0.0) resources
//!
//! Patient and Contract keep their R4 shape and are compiled from the R4
//! definitions against this module's `Resource` enum.

mod claim;
mod code_system;
#[path = "../r4/contract.rs"]
mod contract;
mod observation;
#[path = "../r4/patient.rs"]
mod patient;

pub use claim::*;
pub use code_system::*;
pub use contract::*;
pub use observation::*;
pub use patient::*;

pub use crate::common::operation_outcome::OperationOutcome;

resource_enum! {
    /// Any R5 resource modelled by this crate
    Resource {
        Patient(Patient),
        Observation(Observation),
        CodeSystem(CodeSystem),
        Contract(Contract),
        Claim(Claim),
        OperationOutcome(OperationOutcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_r5_observation_dispatch() {
        let resource = Resource::from_json(json!({
            "resourceType": "Observation",
            "bodyStructure": { "reference": "BodyStructure/1" }
        }))
        .unwrap();

        match resource {
            Resource::Observation(observation) => {
                assert!(observation.body_structure.is_some());
            }
            other => panic!("unexpected resource {:?}", other.resource_type()),
        }
    }

    #[test]
    fn test_mismatched_resource_type_is_rejected() {
        let result = serde_json::from_value::<Patient>(json!({ "resourceType": "Claim" }));
        assert!(result.is_err());
    }
}
