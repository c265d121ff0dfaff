//! Data Source Adapter.
//!
//! A [`PatientSource`] turns one [`SearchQuery`] into an ordered result set. Two
//! implementations exist:
//!
//! - [`LocalSource`]: case-insensitive substring filter over the static mock dataset, with an
//!   artificial latency so the widget behaves the same as against a server.
//! - [`RemoteSource`]: one `GET <endpoint>?<field>=<term>` against a FHIR endpoint, parsing a
//!   searchset bundle. Only `name` and `identifier` are sent; other fields short-circuit to
//!   zero results.

pub mod local;
pub mod remote;

#[cfg(test)]
pub(crate) mod testing;

pub use local::{field_value, filter_records, LocalSource};
pub use remote::{search_url, validate_endpoint, HttpTransport, RemoteSource, Transport};

use crate::config::Timings;
use crate::error::SearchResult;
use crate::query::SearchQuery;
use async_trait::async_trait;
use fhir::PatientRecord;
use std::sync::Arc;

/// Resolves patient records for a query.
#[async_trait]
pub trait PatientSource: Send + Sync {
    /// Execute `query`, returning records in display order.
    async fn search(&self, query: &SearchQuery) -> SearchResult<Vec<PatientRecord>>;
}

/// Pick the source a widget uses: remote when an endpoint is configured, local otherwise.
///
/// A remote source uses `transport` when given, a fresh [`HttpTransport`] otherwise.
pub fn source_for(
    endpoint: Option<&str>,
    transport: Option<Arc<dyn Transport>>,
    timings: Timings,
) -> Arc<dyn PatientSource> {
    match endpoint {
        Some(endpoint) => {
            let transport = transport.unwrap_or_else(|| Arc::new(HttpTransport::new()));
            Arc::new(RemoteSource::new(endpoint, transport))
        }
        None => Arc::new(LocalSource::mock(timings.local_latency)),
    }
}
