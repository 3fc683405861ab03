//! Remote FHIR validation
//!
//! [`RemoteValidator`] implements the [`fhirkit_models::Validator`] seam by
//! calling a FHIR server's `$validate` operation, so any fhirkit builder can
//! be checked with `build_or_throw`.
//!
//! ```rust,no_run
//! use fhirkit_models::r4::PatientBuilder;
//! use fhirkit_models::ElementBuilder;
//! use fhirkit_validator::RemoteValidator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = RemoteValidator::with_base_url("https://hapi.fhir.org/baseR4")?;
//! let patient = PatientBuilder::new()
//!     .set_active(true)
//!     .build_or_throw(&validator)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod remote;

pub use config::RemoteValidatorConfig;
pub use error::{Error, Result};
pub use remote::RemoteValidator;
