//! FHIR searchset bundle: extraction of patient records and construction for mock servers.
//!
//! A search response is expected to look like `{ "entry": [ { "resource": <Patient> }, ... ] }`.
//! Any other JSON shape (no `entry`, `entry` not a list, a bare array) means zero results.

use crate::patient::PatientRecord;
use crate::{FhirError, FhirResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Search result bundle as served by a FHIR endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(rename = "type")]
    pub bundle_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<BundleLink>,

    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

/// Bundle navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleLink {
    pub relation: String,
    pub url: String,
}

/// Bundle entry wrapping one record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(rename = "fullUrl", default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<PatientRecord>,
}

impl Bundle {
    /// Build a searchset bundle around `records`.
    ///
    /// `base_url` is the resource endpoint (e.g. `http://fhir-server/Patient`); entries get
    /// `fullUrl = <base_url>/<id>`. `self_url` becomes the `self` link when provided.
    pub fn searchset(records: &[PatientRecord], base_url: &str, self_url: Option<&str>) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            resource_type: "Bundle".to_string(),
            bundle_type: "searchset".to_string(),
            total: Some(records.len()),
            link: self_url
                .map(|url| {
                    vec![BundleLink {
                        relation: "self".to_string(),
                        url: url.to_string(),
                    }]
                })
                .unwrap_or_default(),
            entry: records
                .iter()
                .map(|record| BundleEntry {
                    full_url: record.id.as_ref().map(|id| format!("{base_url}/{id}")),
                    resource: Some(record.clone()),
                })
                .collect(),
        }
    }

    /// Records carried by this bundle, in entry order.
    pub fn records(&self) -> Vec<PatientRecord> {
        self.entry
            .iter()
            .filter_map(|entry| entry.resource.clone())
            .collect()
    }
}

/// Extract the records of a search response body.
///
/// Entries without a `resource`, and resources that are not JSON objects, are skipped.
pub fn records_from_search_response(body: Value) -> Vec<PatientRecord> {
    let Value::Object(mut object) = body else {
        return Vec::new();
    };
    let Some(Value::Array(entries)) = object.remove("entry") else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let resource = match entry {
            Value::Object(mut wrapper) => wrapper.remove("resource"),
            _ => None,
        };
        match resource {
            Some(Value::Null) | None => continue,
            Some(resource) => match PatientRecord::from_value(resource) {
                Ok(record) => records.push(record),
                Err(err) => tracing::warn!(index, error = %err, "skipping bundle entry"),
            },
        }
    }
    records
}

/// Parse a raw response body and extract its records.
///
/// # Errors
///
/// Returns [`FhirError::InvalidJson`] for a body that is not JSON.
pub fn parse_search_response(body: &str) -> FhirResult<Vec<PatientRecord>> {
    let value: Value = serde_json::from_str(body).map_err(FhirError::InvalidJson)?;
    Ok(records_from_search_response(value))
}
