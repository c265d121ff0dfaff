//! Widget Controller.
//!
//! Owns the overlay for the widget's whole life and drives the search lifecycle:
//!
//! ```text
//! Idle -> Validating -> Rejected (empty term)
//!                    -> Loading -> Succeeded -> Rendered
//!                               -> Failed    -> ErrorRendered
//! ```
//!
//! Every search gets a sequence number. A search that completes after a newer one was
//! started is discarded, so the view always reflects the latest request.

use crate::config::{SelectHandler, WidgetConfig};
use crate::error::WidgetResult;
use crate::events::{ClickTarget, EventOutcome, Key, UiEvent};
use crate::host::{HostEnvironment, MountPoint};
use crate::messaging::FrameMessage;
use crate::overlay::{Overlay, ResultsView};
use fhir::PatientRecord;
use ps_core::config::pause;
use ps_core::constants::{MSG_EMPTY_TERM, MSG_SEARCH_FAILED};
use ps_core::sources::source_for;
use ps_core::{PatientSource, SearchQuery, SearchResult, Timings};
use std::sync::Arc;

/// A validated search that has not run yet.
///
/// Obtained from [`PatientSearch::begin_search`]; [`run`](Self::run) it and hand the outcome
/// to [`PatientSearch::finish_search`].
pub struct PendingSearch {
    seq: u64,
    query: SearchQuery,
    source: Arc<dyn PatientSource>,
}

impl PendingSearch {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Execute the query against the widget's data source.
    pub async fn run(self) -> SearchOutcome {
        let result = self.source.search(&self.query).await;
        SearchOutcome {
            seq: self.seq,
            result,
        }
    }
}

/// Result of one search invocation, tagged with its sequence number.
pub struct SearchOutcome {
    pub seq: u64,
    pub result: SearchResult<Vec<PatientRecord>>,
}

/// The patient search modal.
pub struct PatientSearch<H: HostEnvironment> {
    host: H,
    source: Arc<dyn PatientSource>,
    on_select: Option<SelectHandler>,
    cross_frame: bool,
    mount_point: MountPoint,
    timings: Timings,
    overlay: Overlay,
    current_results: Vec<PatientRecord>,
    selected_this_cycle: bool,
    latest_seq: u64,
}

impl<H: HostEnvironment> PatientSearch<H> {
    /// Build the widget and attach its overlay to the host page.
    ///
    /// The data source is the mock dataset unless a remote endpoint is configured.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`](crate::WidgetError::InvalidConfig) when the
    /// configuration does not validate.
    pub fn new(config: WidgetConfig, host: H) -> WidgetResult<Self> {
        let source = source_for(
            config.remote_endpoint(),
            config.transport.clone(),
            config.timings(),
        );
        Self::with_source(config, host, source)
    }

    /// As [`new`](Self::new), with an explicit data source.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`](crate::WidgetError::InvalidConfig) when the
    /// configuration does not validate.
    pub fn with_source(
        config: WidgetConfig,
        host: H,
        source: Arc<dyn PatientSource>,
    ) -> WidgetResult<Self> {
        config.validate()?;

        let WidgetConfig {
            enabled_fields,
            on_select,
            cross_frame_mode,
            mount_point_id,
            timings,
            ..
        } = config;

        let cross_frame = cross_frame_mode.unwrap_or_else(|| host.is_embedded());
        let mount_point = host.resolve_mount_point(mount_point_id.as_deref());
        let overlay = Overlay::new(enabled_fields);
        host.attach_overlay(&mount_point, &overlay);

        tracing::debug!(?mount_point, cross_frame, "patient search widget created");

        Ok(Self {
            host,
            source,
            on_select,
            cross_frame,
            mount_point,
            timings,
            overlay,
            current_results: Vec::new(),
            selected_this_cycle: false,
            latest_seq: 0,
        })
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn mount_point(&self) -> &MountPoint {
        &self.mount_point
    }

    pub fn is_cross_frame(&self) -> bool {
        self.cross_frame
    }

    /// Records of the last applied search.
    pub fn current_results(&self) -> &[PatientRecord] {
        &self.current_results
    }

    /// Make the overlay visible and, once the opening transition has settled, focus the
    /// search input. No-op when already open.
    pub async fn show(&mut self) {
        if self.overlay.is_open() {
            return;
        }
        self.selected_this_cycle = false;
        self.overlay.begin_open();
        self.refresh();
        tracing::debug!("overlay opening");

        pause(self.timings.settle).await;

        if self.overlay.is_open() {
            self.overlay.focus_input();
            self.refresh();
        }
    }

    /// Close the overlay; once the closing transition has settled it leaves the layout but
    /// stays in the document. No-op when already closed.
    ///
    /// In cross-frame mode a close without a selection in this cycle notifies the parent.
    pub async fn hide(&mut self) {
        if !self.overlay.is_open() {
            return;
        }
        self.overlay.begin_close();
        if self.cross_frame && !self.selected_this_cycle {
            self.host.post_to_parent(&FrameMessage::ModalClosed);
        }
        self.refresh();
        tracing::debug!(selected = self.selected_this_cycle, "overlay closing");

        pause(self.timings.settle).await;

        if !self.overlay.is_open() {
            self.overlay.finish_close();
            self.refresh();
        }
    }

    /// Detach the overlay permanently and hand the host back.
    pub fn destroy(self) -> H {
        self.host.detach_overlay(&self.mount_point);
        tracing::debug!(mount_point = ?self.mount_point, "patient search widget destroyed");
        self.host
    }

    /// Set the field selector, as the user would.
    pub fn set_search_field(&mut self, field: impl Into<String>) {
        self.overlay.set_selected_field(field);
        self.refresh();
    }

    /// Set the search input, as the user would.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.overlay.set_term(term);
        self.refresh();
    }

    /// Replace the results area with a message.
    pub fn show_message(&mut self, message: impl Into<String>) {
        self.overlay.set_view(ResultsView::Message(message.into()));
        self.refresh();
    }

    /// Validate the current controls and start a search.
    ///
    /// An empty term renders the validation message and returns `None`. Otherwise the
    /// previous result set is discarded, the loading indicator is rendered and the search is
    /// returned for the caller to run.
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        let query = match SearchQuery::parse(self.overlay.selected_field(), self.overlay.term()) {
            Ok(query) => query,
            Err(_) => {
                self.show_message(MSG_EMPTY_TERM);
                return None;
            }
        };

        self.latest_seq += 1;
        self.current_results.clear();
        self.overlay.set_view(ResultsView::Loading);
        self.refresh();
        tracing::debug!(seq = self.latest_seq, field = %query.field(), "search started");

        Some(PendingSearch {
            seq: self.latest_seq,
            query,
            source: Arc::clone(&self.source),
        })
    }

    /// Apply a finished search. Returns `false` when a newer search has started since, in
    /// which case the outcome is dropped and the view left alone.
    pub fn finish_search(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.seq != self.latest_seq {
            tracing::warn!(
                seq = outcome.seq,
                latest = self.latest_seq,
                "discarding stale search result"
            );
            return false;
        }

        match outcome.result {
            Ok(records) => {
                tracing::debug!(seq = outcome.seq, matches = records.len(), "search rendered");
                self.overlay.set_view(ResultsView::from_records(&records));
                self.current_results = records;
            }
            Err(err) => {
                tracing::error!(seq = outcome.seq, error = %err, "search failed");
                self.overlay
                    .set_view(ResultsView::Message(MSG_SEARCH_FAILED.to_string()));
            }
        }
        self.refresh();
        true
    }

    /// Run a search with the current control values and render the outcome. Failures are
    /// rendered, never returned.
    pub async fn perform_search(&mut self) {
        let Some(pending) = self.begin_search() else {
            return;
        };
        let outcome = pending.run().await;
        self.finish_search(outcome);
    }

    /// Select the record with `patient_id` from the current result set.
    ///
    /// Returns `None` (and does nothing) when no such record is displayed.
    pub async fn select_row(&mut self, patient_id: &str) -> Option<PatientRecord> {
        let Some(record) = self
            .current_results
            .iter()
            .find(|record| record.id() == patient_id)
            .cloned()
        else {
            tracing::warn!(patient_id, "row does not match a current result");
            return None;
        };
        self.select_patient(record.clone()).await;
        Some(record)
    }

    /// Hand `record` to the selection callback and, in cross-frame mode, to the parent frame,
    /// then close the modal.
    pub async fn select_patient(&mut self, record: PatientRecord) {
        tracing::debug!(patient_id = record.id(), "patient selected");
        if let Some(handler) = self.on_select.as_mut() {
            handler(&record);
        }
        if self.cross_frame {
            self.host
                .post_to_parent(&FrameMessage::PatientSelected { patient: record });
        }
        self.selected_this_cycle = true;
        self.hide().await;
    }

    /// Route one input event.
    pub async fn dispatch(&mut self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Click(ClickTarget::CloseButton | ClickTarget::Backdrop) => {
                self.dismiss().await
            }
            UiEvent::Click(ClickTarget::ModalBody) => EventOutcome::Ignored,
            UiEvent::Click(ClickTarget::SearchButton) | UiEvent::InputKeyPress(Key::Enter) => {
                self.perform_search().await;
                EventOutcome::Searched
            }
            UiEvent::Click(ClickTarget::Row(patient_id)) => match self.select_row(&patient_id).await
            {
                Some(record) => EventOutcome::Selected(record),
                None => EventOutcome::Ignored,
            },
            UiEvent::DocumentKeyDown(Key::Escape) => self.dismiss().await,
            UiEvent::InputKeyPress(_) | UiEvent::DocumentKeyDown(_) => EventOutcome::Ignored,
            UiEvent::FieldSelected(value) => {
                self.set_search_field(value);
                EventOutcome::Updated
            }
            UiEvent::TermInput(value) => {
                self.set_search_term(value);
                EventOutcome::Updated
            }
        }
    }

    async fn dismiss(&mut self) -> EventOutcome {
        if !self.overlay.is_open() {
            return EventOutcome::Ignored;
        }
        self.hide().await;
        EventOutcome::Dismissed
    }

    fn refresh(&self) {
        self.host.overlay_changed(&self.overlay);
    }
}
