use super::PatientSource;
use crate::config::pause;
use crate::error::SearchResult;
use crate::mock_data::mock_patients;
use crate::query::SearchQuery;
use async_trait::async_trait;
use fhir::{ContactKind, PatientRecord};
use search_types::SearchField;
use std::time::Duration;

/// In-memory source over a static dataset.
#[derive(Clone, Debug)]
pub struct LocalSource {
    records: &'static [PatientRecord],
    latency: Duration,
}

impl LocalSource {
    pub fn new(records: &'static [PatientRecord], latency: Duration) -> Self {
        Self { records, latency }
    }

    /// Source over the bundled mock dataset.
    pub fn mock(latency: Duration) -> Self {
        Self::new(mock_patients(), latency)
    }
}

#[async_trait]
impl PatientSource for LocalSource {
    async fn search(&self, query: &SearchQuery) -> SearchResult<Vec<PatientRecord>> {
        pause(self.latency).await;
        let results = filter_records(self.records, query);
        tracing::debug!(
            field = %query.field(),
            matches = results.len(),
            "local search complete"
        );
        Ok(results)
    }
}

/// The value a field is matched against; empty for unrecognised fields.
pub fn field_value(record: &PatientRecord, field: &SearchField) -> String {
    match field {
        SearchField::Name => record.display_name(),
        SearchField::Identifier => record.external_identifier(),
        SearchField::Phone => record.contact_value(ContactKind::Phone),
        SearchField::Email => record.contact_value(ContactKind::Email),
        SearchField::Other(_) => String::new(),
    }
}

/// Records whose lower-cased field value contains the lower-cased term, in dataset order.
pub fn filter_records(records: &[PatientRecord], query: &SearchQuery) -> Vec<PatientRecord> {
    let term = query.term().to_lowercase();
    records
        .iter()
        .filter(|record| {
            let value = field_value(record, query.field());
            !value.is_empty() && value.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(field: &str, term: &str) -> Vec<PatientRecord> {
        let query = SearchQuery::parse(field, term).expect("valid query");
        filter_records(mock_patients(), &query)
    }

    fn names(records: &[PatientRecord]) -> Vec<String> {
        records.iter().map(PatientRecord::display_name).collect()
    }

    #[test]
    fn name_search_is_case_insensitive() {
        let lower = search("name", "john");
        let upper = search("name", "JOHN");
        assert_eq!(names(&lower), vec!["John Doe", "Robert Johnson"]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn identifier_field_uses_identifier_accessor() {
        let results = search("identifier", "pat001");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].external_identifier(), "PAT001");
    }

    #[test]
    fn phone_and_email_match_first_contact_of_kind() {
        let phone = search("phone", "555-0123");
        assert_eq!(names(&phone), vec!["John Doe"]);

        let email = search("email", "john.doe");
        assert_eq!(names(&email), vec!["John Doe"]);
    }

    #[test]
    fn unrecognised_field_matches_nothing() {
        assert!(search("id", "PAT001").is_empty());
        assert!(search("gender", "male").is_empty());
    }

    #[test]
    fn no_match_yields_empty_set() {
        assert!(search("name", "Nonexistent").is_empty());
    }

    #[test]
    fn records_without_the_field_never_match() {
        let empty = vec![PatientRecord::default()];
        let query = SearchQuery::parse("name", "a").expect("valid");
        assert!(filter_records(&empty, &query).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn local_search_waits_for_configured_latency() {
        let source = LocalSource::mock(Duration::from_millis(300));
        let query = SearchQuery::parse("name", "Smith").expect("valid");
        let start = tokio::time::Instant::now();
        let results = source.search(&query).await.expect("local search never fails");
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(names(&results), vec!["Jane Smith"]);
    }
}
