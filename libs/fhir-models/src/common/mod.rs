//! Version-agnostic FHIR substrate
//!
//! Element traits, builder helpers, the validation seam, and the datatypes
//! whose shape is shared by R4, R4B and R5.

pub mod builder;
pub mod choice;
pub mod datatypes;
pub mod decimal;
pub mod element;
pub mod error;
pub mod extension;
pub mod operation_outcome;
pub mod resource;
pub mod validation;

// Re-export commonly used types
pub use builder::*;
pub use datatypes::*;
pub use element::*;
pub use error::{Error, Result};
pub use extension::*;
pub use operation_outcome::*;
pub use resource::*;
pub use validation::*;
