//! FHIR data models
//!
//! This crate provides strongly-typed Rust structures and fluent builders for
//! FHIR resources, backbone elements and datatypes.
//!
//! # Module Organization
//!
//! - `common`: Version-agnostic substrate (element traits, builders, validation seam)
//!   and the datatypes shared by R4, R4B and R5
//! - `r4`, `r4b`, `r5`: Version-specific resources, each behind a cargo feature
//!
//! # Design Philosophy
//!
//! - **Wire-faithful**: JSON output is sparse and follows FHIR-declared field order,
//!   including the `_field` shadow elements that carry extensions on primitives
//! - **Structural choice types**: `value[x]` style fields are enums, so at most one
//!   variant can ever be populated
//! - **Deferred cardinality**: every field is optional in the draft; required-field
//!   checks belong to the [`Validator`] collaborator
//!
//! # Example
//!
//! ```rust
//! use fhirkit_models::r4::{CodeSystemFilterBuilder, FilterOperator};
//! use fhirkit_models::{ElementBuilder, FhirElement};
//! use serde_json::json;
//!
//! let filter = CodeSystemFilterBuilder::new()
//!     .set_code("is-a")
//!     .add_operator(FilterOperator::IsA)
//!     .build();
//!
//! assert_eq!(
//!     filter.to_json().unwrap(),
//!     json!({ "code": "is-a", "operator": ["is-a"] })
//! );
//! ```

#[macro_use]
mod macros;

pub mod common;

#[cfg(feature = "r4")]
pub mod r4;

#[cfg(feature = "r4b")]
pub mod r4b;

#[cfg(feature = "r5")]
pub mod r5;

// Re-export commonly used types
pub use common::*;
pub use rust_decimal::Decimal;

/// FHIR release a model module targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FhirVersion {
    #[serde(rename = "4.0.1")]
    R4,
    #[serde(rename = "4.3.0")]
    R4B,
    #[serde(rename = "5.0.0")]
    R5,
}

impl FhirVersion {
    /// The `fhirVersion` string published for this release
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R4 => "4.0.1",
            Self::R4B => "4.3.0",
            Self::R5 => "5.0.0",
        }
    }
}

impl std::fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::R4 => write!(f, "R4"),
            Self::R4B => write!(f, "R4B"),
            Self::R5 => write!(f, "R5"),
        }
    }
}

impl std::str::FromStr for FhirVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r4" | "4.0" | "4.0.1" => Ok(Self::R4),
            "r4b" | "4.3" | "4.3.0" => Ok(Self::R4B),
            "r5" | "5.0" | "5.0.0" => Ok(Self::R5),
            other => Err(Error::UnsupportedVersion(other.to_string())),
        }
    }
}
