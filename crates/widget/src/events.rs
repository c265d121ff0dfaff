//! User input routed into the widget.

use fhir::PatientRecord;

/// Keyboard keys the widget reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Element a click landed on.
///
/// Clicks inside the modal body stop propagating there, so only a click whose target is the
/// backdrop itself arrives as [`ClickTarget::Backdrop`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    ModalBody,
    CloseButton,
    SearchButton,
    /// A results row, by the patient id it carries.
    Row(String),
}

/// An input event delivered by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Click(ClickTarget),
    /// Key press inside the search input.
    InputKeyPress(Key),
    /// Key press anywhere in the document.
    DocumentKeyDown(Key),
    /// New value of the field selector.
    FieldSelected(String),
    /// New value of the search input.
    TermInput(String),
}

/// What handling an event amounted to.
#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    /// Nothing happened.
    Ignored,
    /// A control value changed.
    Updated,
    /// A search ran (or was rejected by validation).
    Searched,
    /// The modal was closed without a selection.
    Dismissed,
    /// A patient was selected and the modal closed.
    Selected(PatientRecord),
}
