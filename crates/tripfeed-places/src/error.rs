use thiserror::Error;

/// Errors returned by the place-search provider client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider reported `OVER_QUERY_LIMIT` for this API key.
    #[error("places API quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The provider returned a non-OK status in the response envelope.
    #[error("places API error ({status}): {message}")]
    Api { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
