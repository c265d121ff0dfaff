//! HTML rendering of the overlay.
//!
//! Every text value placed into markup goes through [`escape_html`], including attribute
//! values and messages.

use crate::overlay::{Overlay, ResultRow, ResultsView};
use std::fmt::Write;

const TABLE_HEADERS: [&str; 5] = ["Name", "Patient ID", "Phone", "Email", "Date of Birth"];

/// Escape `&`, `<`, `>`, `"` and `'`. Text without those characters is returned unchanged.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Markup of the whole overlay element.
pub fn overlay_html(overlay: &Overlay) -> String {
    let mut out = String::new();
    let class = if overlay.is_open() {
        "patient-search-overlay show"
    } else {
        "patient-search-overlay"
    };
    let _ = write!(
        out,
        r#"<div class="{class}" style="display: {}">"#,
        overlay.display().css()
    );
    out.push_str(r#"<div class="patient-search-modal">"#);
    out.push_str(concat!(
        r#"<div class="patient-search-header">"#,
        "<h2>Search Patient</h2>",
        r#"<button class="patient-search-close" aria-label="Close">&times;</button>"#,
        "</div>"
    ));
    out.push_str(r#"<div class="patient-search-body"><div class="patient-search-controls">"#);

    out.push_str(r#"<select class="patient-search-select" id="searchField">"#);
    for field in overlay.fields() {
        out.push_str(r#"<option value=""#);
        escape_into(&mut out, field.as_str());
        out.push('"');
        if field.as_str() == overlay.selected_field() {
            out.push_str(" selected");
        }
        out.push('>');
        escape_into(&mut out, field.label());
        out.push_str("</option>");
    }
    out.push_str("</select>");

    out.push_str(concat!(
        r#"<input type="text" class="patient-search-input" id="searchInput" "#,
        r#"placeholder="Enter search term...""#
    ));
    if !overlay.term().is_empty() {
        out.push_str(r#" value=""#);
        escape_into(&mut out, overlay.term());
        out.push('"');
    }
    if overlay.is_input_focused() {
        out.push_str(" autofocus");
    }
    out.push_str("/>");
    out.push_str(r#"<button class="patient-search-button" id="searchButton">Search</button>"#);
    out.push_str("</div>");

    out.push_str(r#"<div class="patient-search-table-container">"#);
    out.push_str(&results_html(overlay.view()));
    out.push_str("</div></div></div></div>");
    out
}

/// Markup of the results area.
pub fn results_html(view: &ResultsView) -> String {
    match view {
        ResultsView::Table(rows) => table_html(rows),
        ResultsView::Loading => message_html("patient-search-loading", view.message().unwrap_or("")),
        _ => message_html("patient-search-no-results", view.message().unwrap_or("")),
    }
}

fn message_html(class: &str, text: &str) -> String {
    let mut out = String::new();
    let _ = write!(out, r#"<div class="{class}">"#);
    escape_into(&mut out, text);
    out.push_str("</div>");
    out
}

fn table_html(rows: &[ResultRow]) -> String {
    let mut out = String::from(r#"<table class="patient-search-table"><thead><tr>"#);
    for header in TABLE_HEADERS {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str(r#"<tr data-patient-id=""#);
        escape_into(&mut out, &row.patient_id);
        out.push_str(r#"">"#);
        for cell in [
            &row.name,
            &row.identifier,
            &row.phone,
            &row.email,
            &row.birth_date,
        ] {
            out.push_str("<td>");
            escape_into(&mut out, cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}
