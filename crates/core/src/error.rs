/// Failures raised while obtaining search results.
///
/// None of these reach the user as text: the widget logs the cause and renders a fixed
/// failure message.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("malformed search response: {0}")]
    MalformedResponse(#[from] fhir::FhirError),
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;
