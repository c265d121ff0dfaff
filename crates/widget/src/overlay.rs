//! Headless model of the overlay element.
//!
//! The overlay is created once per widget and reused across show/hide cycles. It holds every
//! piece of visual state: display mode, the `show` (open) class, input focus, the control
//! values and what the results area currently shows. [`Overlay::markup`] renders it.

use crate::render;
use fhir::{ContactKind, PatientRecord};
use ps_core::constants::{MSG_LOADING, MSG_NO_RESULTS};
use ps_core::SearchField;

/// CSS `display` of the overlay element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    /// `display: none`; out of the layout but still in the document.
    None,
    /// `display: flex`; laid out, visible once the open class is applied.
    Flex,
}

impl Display {
    pub fn css(self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Flex => "flex",
        }
    }
}

/// One rendered row of the results table; every value is display-ready but not yet escaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRow {
    pub patient_id: String,
    pub name: String,
    pub identifier: String,
    pub phone: String,
    pub email: String,
    pub birth_date: String,
}

impl ResultRow {
    pub fn from_record(record: &PatientRecord) -> Self {
        Self {
            patient_id: record.id().to_string(),
            name: record.display_name(),
            identifier: record.external_identifier(),
            phone: record.contact_value(ContactKind::Phone),
            email: record.contact_value(ContactKind::Email),
            birth_date: record.formatted_birth_date(),
        }
    }
}

/// Content of the results area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultsView {
    /// Before the first search.
    Prompt,
    /// A search is in flight.
    Loading,
    /// Validation or failure message.
    Message(String),
    /// The last search found nothing.
    NoResults,
    /// One row per record, in result order.
    Table(Vec<ResultRow>),
}

impl ResultsView {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        if records.is_empty() {
            ResultsView::NoResults
        } else {
            ResultsView::Table(records.iter().map(ResultRow::from_record).collect())
        }
    }

    /// Text shown when the view is a single message rather than a table.
    pub fn message(&self) -> Option<&str> {
        match self {
            ResultsView::Prompt => Some(ps_core::constants::MSG_INITIAL_PROMPT),
            ResultsView::Loading => Some(MSG_LOADING),
            ResultsView::Message(text) => Some(text),
            ResultsView::NoResults => Some(MSG_NO_RESULTS),
            ResultsView::Table(_) => None,
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        match self {
            ResultsView::Table(rows) => rows,
            _ => &[],
        }
    }
}

/// The overlay element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    display: Display,
    open: bool,
    input_focused: bool,
    fields: Vec<SearchField>,
    selected_field: String,
    term: String,
    view: ResultsView,
}

impl Overlay {
    /// A hidden overlay offering `fields`; the first one is preselected.
    pub fn new(fields: Vec<SearchField>) -> Self {
        let selected_field = fields
            .first()
            .map(|f| f.as_str().to_string())
            .unwrap_or_default();
        Self {
            display: Display::None,
            open: false,
            input_focused: false,
            fields,
            selected_field,
            term: String::new(),
            view: ResultsView::Prompt,
        }
    }

    pub fn display(&self) -> Display {
        self.display
    }

    /// Whether the open (`show`) class is applied.
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    /// Current value of the field selector.
    pub fn selected_field(&self) -> &str {
        &self.selected_field
    }

    /// Current (untrimmed) value of the search input.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// Full element markup.
    pub fn markup(&self) -> String {
        render::overlay_html(self)
    }

    /// Markup of the results area only.
    pub fn results_markup(&self) -> String {
        render::results_html(&self.view)
    }

    pub(crate) fn begin_open(&mut self) {
        self.display = Display::Flex;
        self.open = true;
    }

    pub(crate) fn begin_close(&mut self) {
        self.open = false;
    }

    pub(crate) fn finish_close(&mut self) {
        self.display = Display::None;
        self.input_focused = false;
    }

    pub(crate) fn focus_input(&mut self) {
        self.input_focused = true;
    }

    pub(crate) fn set_selected_field(&mut self, value: impl Into<String>) {
        self.selected_field = value.into();
    }

    pub(crate) fn set_term(&mut self, value: impl Into<String>) {
        self.term = value.into();
    }

    pub(crate) fn set_view(&mut self, view: ResultsView) {
        self.view = view;
    }
}
