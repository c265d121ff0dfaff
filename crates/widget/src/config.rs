//! Construction-time widget configuration.
//!
//! This is the widget's entire configuration surface: there is no file or environment
//! configuration. Values are validated once, when the widget is built.

use crate::error::{WidgetError, WidgetResult};
use fhir::PatientRecord;
use ps_core::sources::{validate_endpoint, Transport};
use ps_core::{SearchField, Timings};
use std::sync::Arc;

/// Callback invoked synchronously with the selected record.
pub type SelectHandler = Box<dyn FnMut(&PatientRecord) + Send>;

/// Options recognised by [`PatientSearch::new`](crate::PatientSearch::new).
pub struct WidgetConfig {
    pub(crate) remote_endpoint: Option<String>,
    pub(crate) transport: Option<Arc<dyn Transport>>,
    pub(crate) enabled_fields: Vec<SearchField>,
    pub(crate) on_select: Option<SelectHandler>,
    pub(crate) cross_frame_mode: Option<bool>,
    pub(crate) mount_point_id: Option<String>,
    pub(crate) timings: Timings,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            remote_endpoint: None,
            transport: None,
            enabled_fields: SearchField::DEFAULTS.to_vec(),
            on_select: None,
            cross_frame_mode: None,
            mount_point_id: None,
            timings: Timings::default(),
        }
    }
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search a FHIR endpoint instead of the local mock dataset.
    pub fn with_remote_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.remote_endpoint = Some(endpoint.into());
        self
    }

    /// Transport for remote searches; an HTTP client is used when unset.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Fields offered in the selector, in display order.
    pub fn with_enabled_fields(mut self, fields: impl IntoIterator<Item = SearchField>) -> Self {
        self.enabled_fields = fields.into_iter().collect();
        self
    }

    pub fn on_select(mut self, handler: impl FnMut(&PatientRecord) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Override cross-frame detection. Unset, the host decides via
    /// [`HostEnvironment::is_embedded`](crate::HostEnvironment::is_embedded).
    pub fn with_cross_frame_mode(mut self, enabled: bool) -> Self {
        self.cross_frame_mode = Some(enabled);
        self
    }

    /// Id of the element the overlay is mounted into; unset means the document root.
    pub fn with_mount_point_id(mut self, id: impl Into<String>) -> Self {
        self.mount_point_id = Some(id.into());
        self
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn remote_endpoint(&self) -> Option<&str> {
        self.remote_endpoint.as_deref()
    }

    pub fn enabled_fields(&self) -> &[SearchField] {
        &self.enabled_fields
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] if no search field is enabled, or if the remote
    /// endpoint is not an absolute http(s) URL.
    pub fn validate(&self) -> WidgetResult<()> {
        if self.enabled_fields.is_empty() {
            return Err(WidgetError::InvalidConfig(
                "at least one search field must be enabled".into(),
            ));
        }

        if let Some(endpoint) = &self.remote_endpoint {
            validate_endpoint(endpoint).map_err(|e| WidgetError::InvalidConfig(e.to_string()))?;
        }

        if let Some(id) = &self.mount_point_id {
            if id.trim().is_empty() {
                return Err(WidgetError::InvalidConfig(
                    "mount point id cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("remote_endpoint", &self.remote_endpoint)
            .field("transport", &self.transport.is_some())
            .field("enabled_fields", &self.enabled_fields)
            .field("on_select", &self.on_select.is_some())
            .field("cross_frame_mode", &self.cross_frame_mode)
            .field("mount_point_id", &self.mount_point_id)
            .field("timings", &self.timings)
            .finish()
    }
}
