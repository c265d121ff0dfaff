//! Test doubles for the data sources.

use super::Transport;
use crate::error::{SearchError, SearchResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records requested URLs and replays a fixed outcome.
pub(crate) struct FakeTransport {
    requests: Mutex<Vec<String>>,
    reply: Result<String, String>,
}

impl FakeTransport {
    pub(crate) fn replying(body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Ok(body.into()),
        })
    }

    pub(crate) fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Err(reason.to_string()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> SearchResult<String> {
        self.requests.lock().expect("lock").push(url.to_string());
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err(reason) => Err(SearchError::Transport {
                url: url.to_string(),
                source: reason.clone().into(),
            }),
        }
    }
}
