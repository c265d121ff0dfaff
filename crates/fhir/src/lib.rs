//! FHIR wire/boundary support for the patient search widget.
//!
//! This crate provides **wire models** and **read helpers** for patient resources as they
//! arrive from a FHIR endpoint (or the bundled mock dataset):
//! - a loose `Patient` record model whose accessors never fail on missing data
//! - searchset `Bundle` parsing and construction
//! - birth-date display formatting
//!
//! Unlike a validating FHIR model this crate accepts partial resources: absence of any
//! attribute is normal and degrades to an empty display value.

pub mod bundle;
pub mod date;
pub mod patient;

pub use bundle::{parse_search_response, records_from_search_response, Bundle, BundleEntry};
pub use date::format_birth_date;
pub use patient::{ContactKind, ContactPoint, HumanName, Identifier, PatientRecord};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
