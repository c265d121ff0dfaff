//! Mock FHIR patient resources.
//!
//! Used when no remote endpoint is configured, and served by the development mock endpoint.

use crate::constants::{MOCK_FHIR_BASE, MOCK_IDENTIFIER_SYSTEM};
use fhir::{Bundle, ContactPoint, HumanName, Identifier, PatientRecord};
use std::sync::OnceLock;

/// (identifier, given, family, phone, email, gender, birth date)
type MockRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const MOCK_ROWS: [MockRow; 10] = [
    ("PAT001", "John", "Doe", "555-0123", "john.doe@example.com", "male", "1980-05-15"),
    ("PAT002", "Jane", "Smith", "555-0124", "jane.smith@example.com", "female", "1985-08-22"),
    ("PAT003", "Robert", "Johnson", "555-0125", "robert.j@example.com", "male", "1975-03-10"),
    ("PAT004", "Emily", "Williams", "555-0126", "emily.w@example.com", "female", "1990-12-05"),
    ("PAT005", "Michael", "Brown", "555-0127", "michael.b@example.com", "male", "1982-07-18"),
    ("PAT006", "Sarah", "Davis", "555-0128", "sarah.d@example.com", "female", "1988-11-30"),
    ("PAT007", "David", "Miller", "555-0129", "david.m@example.com", "male", "1978-09-25"),
    ("PAT008", "Jennifer", "Wilson", "555-0130", "jennifer.w@example.com", "female", "1992-04-14"),
    ("PAT009", "James", "Moore", "555-0131", "james.m@example.com", "male", "1970-01-20"),
    ("PAT010", "Lisa", "Taylor", "555-0132", "lisa.t@example.com", "female", "1995-06-08"),
];

/// The static mock dataset, built once and shared read-only.
pub fn mock_patients() -> &'static [PatientRecord] {
    static PATIENTS: OnceLock<Vec<PatientRecord>> = OnceLock::new();
    PATIENTS.get_or_init(|| {
        MOCK_ROWS
            .iter()
            .enumerate()
            .map(|(index, row)| mock_patient(index, row))
            .collect()
    })
}

/// The mock dataset wrapped in a searchset bundle.
pub fn mock_bundle() -> Bundle {
    Bundle::searchset(mock_patients(), MOCK_FHIR_BASE, None)
}

fn mock_patient(
    index: usize,
    &(identifier, given, family, phone, email, gender, birth_date): &MockRow,
) -> PatientRecord {
    PatientRecord {
        resource_type: Some("Patient".to_string()),
        id: Some(format!("550e8400-e29b-41d4-a716-44665544{index:04}")),
        identifier: vec![Identifier {
            system: Some(MOCK_IDENTIFIER_SYSTEM.to_string()),
            value: Some(identifier.to_string()),
            ..Default::default()
        }],
        name: vec![HumanName {
            use_type: Some("official".to_string()),
            family: Some(family.to_string()),
            given: vec![given.to_string()],
            ..Default::default()
        }],
        telecom: vec![
            ContactPoint {
                system: Some("phone".to_string()),
                value: Some(phone.to_string()),
                use_type: Some("home".to_string()),
                ..Default::default()
            },
            ContactPoint {
                system: Some("email".to_string()),
                value: Some(email.to_string()),
                ..Default::default()
            },
        ],
        gender: Some(gender.to_string()),
        birth_date: Some(birth_date.to_string()),
        ..Default::default()
    }
}
