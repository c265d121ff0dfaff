//! # Patient Search Widget
//!
//! A modal overlay that lets a host page search patient records and pick one.
//!
//! The widget never touches ambient browser state. Everything it needs from its surroundings
//! ("am I embedded in another frame", "post a message to the parent", "where do I mount")
//! comes through a [`HostEnvironment`] passed at construction, so the same controller runs
//! against a real DOM binding, a terminal, or a recording fake in tests.
//!
//! Lifecycle:
//! - [`PatientSearch::new`] builds the overlay once and attaches it to the mount point
//! - [`PatientSearch::show`] / [`PatientSearch::hide`] toggle it (the element is reused)
//! - [`PatientSearch::dispatch`] routes user input (clicks, keys, typing)
//! - [`PatientSearch::destroy`] detaches it for good

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod host;
pub mod messaging;
pub mod overlay;
pub mod render;

#[cfg(test)]
mod testing;

pub use config::{SelectHandler, WidgetConfig};
pub use controller::{PatientSearch, PendingSearch, SearchOutcome};
pub use error::{WidgetError, WidgetResult};
pub use events::{ClickTarget, EventOutcome, Key, UiEvent};
pub use host::{HostEnvironment, MountPoint, TopLevelHost};
pub use messaging::FrameMessage;
pub use overlay::{Display, Overlay, ResultRow, ResultsView};
pub use render::escape_html;

pub use ps_core::{PatientRecord, SearchField, Timings};
