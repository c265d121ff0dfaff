//! FHIR-aligned patient wire model and field accessors.
//!
//! Records arriving from a remote endpoint are loosely structured: any attribute may be
//! absent, `null` or of an unexpected type. The model therefore reads every field leniently
//! (scalars become text, malformed list elements are dropped) and the accessors are total:
//! missing data yields an empty string, never an error.
//!
//! Attributes this model does not name (for example `gender`, `meta`, extensions) are kept in
//! [`PatientRecord::extra`] so a record hands back exactly what was received.

use crate::date::format_birth_date;
use crate::FhirError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Kind of contact point (`telecom.system` in FHIR).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
}

impl ContactKind {
    /// Convert to FHIR wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            ContactKind::Phone => "phone",
            ContactKind::Email => "email",
        }
    }
}

/// A searchable patient resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(
        rename = "resourceType",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_type: Option<String>,

    /// Opaque resource id; rows in the results table are keyed by it.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub identifier: Vec<Identifier>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub name: Vec<HumanName>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub telecom: Vec<ContactPoint>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,

    /// Calendar date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    #[serde(
        rename = "birthDate",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Human name entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(
        rename = "use",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub family: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub given: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HumanName {
    /// Given names joined by a single space, then the family name; trimmed.
    pub fn display(&self) -> String {
        let given = self.given.join(" ");
        let family = self.family.as_deref().unwrap_or("");
        format!("{given} {family}").trim().to_string()
    }
}

/// External identifier entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub system: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contact point entry (`telecom`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub system: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,

    #[serde(
        rename = "use",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Accessors
// ============================================================================

impl PatientRecord {
    /// Parse a single patient resource from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] when `value` is not a JSON object. Attributes of an
    /// unexpected type are read leniently and never fail.
    pub fn from_value(value: Value) -> Result<Self, FhirError> {
        serde_path_to_error::deserialize::<_, PatientRecord>(value).map_err(|err| {
            let path = err.path().to_string();
            let path = if path.is_empty() {
                "<root>".to_string()
            } else {
                path
            };
            FhirError::Translation(format!(
                "Patient schema mismatch at {path}: {}",
                err.into_inner()
            ))
        })
    }

    /// Record id, or empty string.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Display name from the first name entry; empty string if there is none.
    pub fn display_name(&self) -> String {
        self.name.first().map(HumanName::display).unwrap_or_default()
    }

    /// Value of the first identifier entry; empty string if there is none.
    pub fn external_identifier(&self) -> String {
        self.identifier
            .first()
            .and_then(|id| id.value.clone())
            .unwrap_or_default()
    }

    /// Value of the first contact point of the given kind; empty string if there is none.
    pub fn contact_value(&self, kind: ContactKind) -> String {
        self.contact_value_for(kind.to_wire())
    }

    /// As [`contact_value`](Self::contact_value), matching on the raw `system` string.
    pub fn contact_value_for(&self, system: &str) -> String {
        self.telecom
            .iter()
            .find(|t| t.system.as_deref() == Some(system))
            .and_then(|t| t.value.clone())
            .unwrap_or_default()
    }

    /// Birth date as an abbreviated US English date; empty if absent or unparsable.
    pub fn formatted_birth_date(&self) -> String {
        self.birth_date
            .as_deref()
            .map(format_birth_date)
            .unwrap_or_default()
    }
}

/// Read a scalar attribute as text. Numbers and booleans keep their JSON spelling; `null`,
/// objects and arrays read as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Read a list attribute, dropping elements of the wrong shape. Anything other than an array
/// reads as an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn john_doe() -> PatientRecord {
        PatientRecord::from_value(json!({
            "resourceType": "Patient",
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "identifier": [{ "system": "http://hospital.example.org/patients", "value": "PAT001" }],
            "name": [{ "use": "official", "family": "Doe", "given": ["John"] }],
            "telecom": [
                { "system": "phone", "value": "555-0123", "use": "home" },
                { "system": "email", "value": "john.doe@example.com" }
            ],
            "gender": "male",
            "birthDate": "1980-05-15"
        }))
        .expect("valid patient")
    }

    #[test]
    fn extracts_fields_from_full_record() {
        let patient = john_doe();
        assert_eq!(patient.display_name(), "John Doe");
        assert_eq!(patient.external_identifier(), "PAT001");
        assert_eq!(patient.contact_value(ContactKind::Phone), "555-0123");
        assert_eq!(patient.contact_value(ContactKind::Email), "john.doe@example.com");
        assert_eq!(patient.formatted_birth_date(), "May 15, 1980");
        assert_eq!(patient.name[0].use_type.as_deref(), Some("official"));
    }

    #[test]
    fn missing_attributes_degrade_to_empty_strings() {
        let patient = PatientRecord::from_value(json!({})).expect("empty object is a record");
        assert_eq!(patient.id(), "");
        assert_eq!(patient.display_name(), "");
        assert_eq!(patient.external_identifier(), "");
        assert_eq!(patient.contact_value(ContactKind::Phone), "");
        assert_eq!(patient.contact_value(ContactKind::Email), "");
        assert_eq!(patient.formatted_birth_date(), "");
    }

    #[test]
    fn null_attributes_are_treated_as_absent() {
        let patient = PatientRecord::from_value(json!({
            "id": "p1",
            "name": null,
            "identifier": null,
            "telecom": null,
            "birthDate": null
        }))
        .expect("nulls accepted");
        assert_eq!(patient.display_name(), "");
        assert_eq!(patient.external_identifier(), "");
        assert_eq!(patient.contact_value(ContactKind::Email), "");
        assert_eq!(patient.formatted_birth_date(), "");
    }

    #[test]
    fn partial_entries_degrade_to_empty_strings() {
        let patient = PatientRecord::from_value(json!({
            "name": [{ "use": "official" }],
            "identifier": [{ "system": "urn:x" }],
            "telecom": [{ "system": "phone" }]
        }))
        .expect("valid");
        assert_eq!(patient.display_name(), "");
        assert_eq!(patient.external_identifier(), "");
        assert_eq!(patient.contact_value(ContactKind::Phone), "");
    }

    #[test]
    fn display_name_uses_first_entry_and_joins_given_names() {
        let patient = PatientRecord::from_value(json!({
            "name": [
                { "family": "Williams", "given": ["Sarah", "Jane"] },
                { "use": "nickname", "given": ["Sally"] }
            ]
        }))
        .expect("valid");
        assert_eq!(patient.display_name(), "Sarah Jane Williams");
    }

    #[test]
    fn display_name_trims_when_one_part_is_missing() {
        let family_only =
            PatientRecord::from_value(json!({ "name": [{ "family": "Doe" }] })).expect("valid");
        assert_eq!(family_only.display_name(), "Doe");

        let given_only =
            PatientRecord::from_value(json!({ "name": [{ "given": ["John"] }] })).expect("valid");
        assert_eq!(given_only.display_name(), "John");
    }

    #[test]
    fn contact_value_picks_first_matching_kind() {
        let patient = PatientRecord::from_value(json!({
            "telecom": [
                { "system": "email", "value": "first@example.com" },
                { "system": "phone", "value": "555-0001" },
                { "system": "phone", "value": "555-0002" }
            ]
        }))
        .expect("valid");
        assert_eq!(patient.contact_value(ContactKind::Phone), "555-0001");
        assert_eq!(patient.contact_value_for("fax"), "");
    }

    #[test]
    fn unknown_name_use_is_kept_raw() {
        let patient = PatientRecord::from_value(json!({
            "name": [{ "use": "stage-name", "family": "X" }]
        }))
        .expect("unknown use is not an error");
        assert_eq!(patient.name[0].use_type.as_deref(), Some("stage-name"));
    }

    #[test]
    fn preserves_unmodelled_attributes() {
        let input = json!({
            "resourceType": "Patient",
            "id": "p1",
            "active": true,
            "meta": { "lastUpdated": "2025-11-08T18:04:45.204+00:00" },
            "name": [{ "family": "Doe", "prefix": ["Mr"] }]
        });
        let patient = PatientRecord::from_value(input.clone()).expect("valid");
        assert_eq!(patient.extra.get("active"), Some(&json!(true)));
        let output = serde_json::to_value(&patient).expect("serialise");
        assert_eq!(output, input);
    }

    #[test]
    fn mismatched_types_degrade_instead_of_failing() {
        let patient = PatientRecord::from_value(json!({
            "id": 123,
            "identifier": { "value": "PAT001" },
            "name": [
                { "family": ["Doe"], "given": "John" },
                "Jane Smith",
                { "family": "Doe", "given": ["John", 7] }
            ],
            "telecom": [{ "system": "phone", "value": 5550123 }],
            "birthDate": false
        }))
        .expect("lenient record");
        assert_eq!(patient.id(), "123");
        assert_eq!(patient.external_identifier(), "");
        assert_eq!(patient.name.len(), 2);
        assert_eq!(patient.display_name(), "");
        assert_eq!(patient.name[1].display(), "John Doe");
        assert_eq!(patient.contact_value(ContactKind::Phone), "5550123");
        assert_eq!(patient.formatted_birth_date(), "");
    }

    #[test]
    fn non_object_resource_reports_the_root() {
        let err = PatientRecord::from_value(json!(42)).expect_err("not an object");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("<root>"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
