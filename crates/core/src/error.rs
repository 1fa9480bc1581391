//! Error types for the HK health feeds.

/// Result type for feed operations.
pub type HealthResult<T> = Result<T, HealthError>;

/// Errors that can occur while talking to the Hospital Authority feeds.
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Upstream body was not valid JSON.
    #[error("Invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A fetch failure surfaced as a fault instead of an error envelope.
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
