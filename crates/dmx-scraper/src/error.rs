use thiserror::Error;

/// Retrieval failures: the remote fetch did not return the expected
/// structured content.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no JSON payload found in rendered response from {url}")]
    MissingPayload { url: String },

    #[error("category \"{category}\" meta response has no length field")]
    MissingLength { category: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
