//! FHIR R4 (4.0.1) resources

mod claim;
mod code_system;
mod contract;
mod observation;
mod patient;

pub use claim::*;
pub use code_system::*;
pub use contract::*;
pub use observation::*;
pub use patient::*;

pub use crate::common::operation_outcome::OperationOutcome;

resource_enum! {
    /// Any R4 resource modelled by this crate
    Resource {
        Patient(Patient),
        Observation(Observation),
        CodeSystem(CodeSystem),
        Contract(Contract),
        Claim(Claim),
        OperationOutcome(OperationOutcome),
    }
}
