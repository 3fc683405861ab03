//! FHIR R4B (4.3.0) resources
//!
//! Every resource modelled here kept its R4 shape, so the R4 definitions are
//! compiled again against this module's `Resource` enum.

#[path = "../r4/claim.rs"]
mod claim;
#[path = "../r4/code_system.rs"]
mod code_system;
#[path = "../r4/contract.rs"]
mod contract;
#[path = "../r4/observation.rs"]
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
    /// Any R4B resource modelled by this crate
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
    use crate::common::builder::{DomainResourceBuilder, ElementBuilder};
    use serde_json::json;

    #[test]
    fn test_contained_uses_r4b_resource() {
        let claim = ClaimBuilder::new()
            .add_contained(PatientBuilder::new().set_id("p1").build())
            .set_patient(crate::common::datatypes::Reference::to("#p1"))
            .build();

        let contained: &Resource = &claim.contained.as_ref().unwrap()[0];
        assert_eq!(contained.resource_type(), "Patient");
    }

    #[test]
    fn test_dispatch() {
        let resource = Resource::from_json(json!({ "resourceType": "Contract", "status": "policy" })).unwrap();
        assert!(matches!(resource, Resource::Contract(_)));
    }
}
