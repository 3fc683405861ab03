//! Library half of the `fhirkit` command line
//!
//! Commands and logging live here so their `tracing` target is
//! `fhirkit_cli`; the binary only parses arguments and dispatches.

pub mod commands;
pub mod logging;
