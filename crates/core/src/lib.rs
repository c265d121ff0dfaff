//! # Patient Search Core
//!
//! Data Source Adapter for the patient search widget.
//!
//! This crate resolves patient records for a search query:
//! - [`sources::LocalSource`]: the static mock dataset, filtered in memory
//! - [`sources::RemoteSource`]: a FHIR endpoint queried with one GET
//!
//! **No UI concerns**: overlay state, rendering and event routing belong in `ps-widget`.

pub mod config;
pub mod constants;
pub mod error;
pub mod mock_data;
pub mod query;
pub mod sources;

pub use config::Timings;
pub use error::{SearchError, SearchResult};
pub use mock_data::{mock_bundle, mock_patients};
pub use query::SearchQuery;
pub use sources::{LocalSource, PatientSource, RemoteSource};

// Re-exported so downstream crates name one set of types.
pub use fhir::{Bundle, ContactKind, PatientRecord};
pub use search_types::{NonEmptyText, SearchField};
