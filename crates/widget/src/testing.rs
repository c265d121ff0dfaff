//! Test doubles shared by the widget's unit tests.

use crate::config::WidgetConfig;
use crate::host::{HostEnvironment, MountPoint};
use crate::messaging::FrameMessage;
use crate::overlay::Overlay;
use async_trait::async_trait;
use fhir::PatientRecord;
use ps_core::sources::Transport;
use ps_core::{PatientSource, SearchError, SearchQuery, SearchResult, Timings};
use std::sync::{Arc, Mutex};

/// Default configuration with zero delays.
pub(crate) fn widget_config() -> WidgetConfig {
    WidgetConfig::new().with_timings(Timings::immediate())
}

/// [`widget_config`] searching `https://x/Patient` through `transport`.
pub(crate) fn remote_config(transport: &Arc<ScriptedTransport>) -> WidgetConfig {
    widget_config()
        .with_remote_endpoint("https://x/Patient")
        .with_transport(transport.clone())
}

#[derive(Debug, Default)]
struct HostLog {
    messages: Vec<FrameMessage>,
    attached: Vec<MountPoint>,
    detached: Vec<MountPoint>,
    changes: usize,
}

/// Host that records every interaction. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingHost {
    embedded: bool,
    elements: Vec<String>,
    log: Arc<Mutex<HostLog>>,
}

impl RecordingHost {
    pub(crate) fn top_level() -> Self {
        Self::default()
    }

    pub(crate) fn embedded() -> Self {
        Self {
            embedded: true,
            ..Self::default()
        }
    }

    /// Make an element id resolvable.
    pub(crate) fn with_element(mut self, id: &str) -> Self {
        self.elements.push(id.to_string());
        self
    }

    pub(crate) fn messages(&self) -> Vec<FrameMessage> {
        self.log.lock().expect("host log").messages.clone()
    }

    pub(crate) fn attached(&self) -> Vec<MountPoint> {
        self.log.lock().expect("host log").attached.clone()
    }

    pub(crate) fn detached(&self) -> Vec<MountPoint> {
        self.log.lock().expect("host log").detached.clone()
    }

    pub(crate) fn change_count(&self) -> usize {
        self.log.lock().expect("host log").changes
    }
}

impl HostEnvironment for RecordingHost {
    fn is_embedded(&self) -> bool {
        self.embedded
    }

    fn post_to_parent(&self, message: &FrameMessage) {
        self.log.lock().expect("host log").messages.push(message.clone());
    }

    fn resolve_mount_point(&self, id: Option<&str>) -> MountPoint {
        match id {
            Some(id) if self.elements.iter().any(|known| known == id) => {
                MountPoint::Element(id.to_string())
            }
            _ => MountPoint::DocumentRoot,
        }
    }

    fn attach_overlay(&self, mount: &MountPoint, _overlay: &Overlay) {
        self.log.lock().expect("host log").attached.push(mount.clone());
    }

    fn detach_overlay(&self, mount: &MountPoint) {
        self.log.lock().expect("host log").detached.push(mount.clone());
    }

    fn overlay_changed(&self, _overlay: &Overlay) {
        self.log.lock().expect("host log").changes += 1;
    }
}

/// Source with a fixed reply that records the queries it receives.
pub(crate) struct ScriptedSource {
    reply: Option<Vec<PatientRecord>>,
    queries: Mutex<Vec<(String, String)>>,
}

impl ScriptedSource {
    pub(crate) fn returning(records: Vec<PatientRecord>) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(records),
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Every search fails with a transport error.
    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            queries: Mutex::new(Vec::new()),
        })
    }

    /// `(field, term)` pairs, in call order.
    pub(crate) fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().expect("queries").clone()
    }
}

#[async_trait]
impl PatientSource for ScriptedSource {
    async fn search(&self, query: &SearchQuery) -> SearchResult<Vec<PatientRecord>> {
        self.queries.lock().expect("queries").push((
            query.field().as_str().to_string(),
            query.term().as_str().to_string(),
        ));
        match &self.reply {
            Some(records) => Ok(records.clone()),
            None => Err(SearchError::Transport {
                url: "http://fhir.test/Patient".to_string(),
                source: "connection refused".into(),
            }),
        }
    }
}

/// Transport with a fixed reply that records the URLs it is asked for.
pub(crate) struct ScriptedTransport {
    reply: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn replying(body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(body.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Every request is rejected as if the network were down.
    pub(crate) fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> SearchResult<String> {
        self.requests.lock().expect("requests").push(url.to_string());
        match &self.reply {
            Some(body) => Ok(body.clone()),
            None => Err(SearchError::Transport {
                url: url.to_string(),
                source: "connection refused".into(),
            }),
        }
    }
}
