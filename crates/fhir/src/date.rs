//! Birth-date display formatting.
//!
//! FHIR `date` values may be partial (`YYYY`, `YYYY-MM`) and some servers send a full
//! `dateTime`. Missing month/day parts default to 1, mirroring how browsers parse them.

use chrono::NaiveDate;

/// Display pattern: abbreviated month, day without padding, four-digit year.
const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Parse a FHIR `date`/`dateTime` string into a calendar date.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // dateTime: keep the calendar part
    let date_part = match raw.split_once('T') {
        Some((date, _time)) => date,
        None => raw,
    };

    let mut parts = date_part.splitn(3, '-');
    let year = parse_component(parts.next()?, 4)?;
    let month = match parts.next() {
        Some(m) => parse_component(m, 2)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(d) => parse_component(d, 2)?,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Format a FHIR birth date for display, e.g. `"May 15, 1980"`.
///
/// Returns an empty string when the value cannot be parsed.
pub fn format_birth_date(raw: &str) -> String {
    parse_birth_date(raw)
        .map(|date| date.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_component(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
