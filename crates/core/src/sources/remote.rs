use super::PatientSource;
use crate::error::{SearchError, SearchResult};
use crate::query::SearchQuery;
use async_trait::async_trait;
use fhir::{parse_search_response, PatientRecord};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// Characters left unescaped in a query component (the `encodeURIComponent` set).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `<endpoint>?<field>=<percent-encoded term>`
pub fn search_url(endpoint: &str, query: &SearchQuery) -> String {
    let term = utf8_percent_encode(query.term().as_str(), QUERY_COMPONENT);
    format!("{}?{}={}", endpoint, query.field(), term)
}

/// Check that `endpoint` is an absolute http(s) URL.
///
/// # Errors
///
/// Returns [`SearchError::InvalidInput`] describing why the endpoint is unusable.
pub fn validate_endpoint(endpoint: &str) -> SearchResult<()> {
    let url = reqwest::Url::parse(endpoint)
        .map_err(|e| SearchError::InvalidInput(format!("invalid endpoint '{endpoint}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SearchError::InvalidInput(format!(
            "endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(())
}

/// Performs the single GET a remote search needs and returns the raw body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> SearchResult<String>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> SearchResult<String> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/fhir+json, application/json",
            )
            .send()
            .await
            .map_err(|e| SearchError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        // The status is not inspected: error pages fail JSON parsing, and JSON error
        // resources carry no `entry`, which already means zero results.
        tracing::debug!(status = %response.status(), url, "remote search responded");

        response.text().await.map_err(|e| SearchError::ResponseBody {
            url: url.to_string(),
            source: Box::new(e),
        })
    }
}

/// Source that queries a FHIR endpoint.
#[derive(Clone)]
pub struct RemoteSource {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl RemoteSource {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request_url(&self, query: &SearchQuery) -> String {
        search_url(&self.endpoint, query)
    }
}

impl std::fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PatientSource for RemoteSource {
    async fn search(&self, query: &SearchQuery) -> SearchResult<Vec<PatientRecord>> {
        if !query.field().is_remote_searchable() {
            tracing::debug!(field = %query.field(), "field not searchable remotely");
            return Ok(Vec::new());
        }

        let url = self.request_url(query);
        let body = self.transport.get(&url).await?;
        let records = parse_search_response(&body)?;
        tracing::debug!(url, matches = records.len(), "remote search complete");
        Ok(records)
    }
}
