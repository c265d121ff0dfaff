//! Constants used throughout the patient search crates.
//!
//! User-visible strings live here so the widget, the CLI and the tests agree on them.

use std::time::Duration;

/// Delay between starting a show/hide transition and completing it.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Artificial latency of local-mode searches.
pub const DEFAULT_LOCAL_LATENCY: Duration = Duration::from_millis(300);

/// Rendered when the search term is empty after trimming.
pub const MSG_EMPTY_TERM: &str = "Please enter a search term";

/// Rendered when obtaining results failed for any reason.
pub const MSG_SEARCH_FAILED: &str = "Error performing search. Please try again.";

/// Rendered for an empty result set.
pub const MSG_NO_RESULTS: &str = "No patients found";

/// Rendered while a search is in flight.
pub const MSG_LOADING: &str = "Searching...";

/// Rendered in the results area before the first search.
pub const MSG_INITIAL_PROMPT: &str = "Enter a search term and click Search to find patients";

/// Base URL used for `fullUrl` values of mock bundles.
pub const MOCK_FHIR_BASE: &str = "http://fhir-server/Patient";

/// Identifier system of the mock hospital.
pub const MOCK_IDENTIFIER_SYSTEM: &str = "http://hospital.example.org/patients";
