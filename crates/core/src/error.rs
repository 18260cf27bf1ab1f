//! Unified error types for duden.

/// Unified error types for the duden client and cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dictionary host could not be reached at all.
    #[error("CONNECTION_FAILED: Connection could not be established. Check your internet connection. ({0})")]
    ConnectionFailed(String),

    /// Transport error other than a refused connection (timeout, TLS, body read).
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Unexpected HTTP status.
    #[error("HTTP_ERROR: status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Markup or JSON did not have the expected shape.
    #[error("PARSE_FAILED: {0}")]
    Parse(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Cache directory or entry could not be written.
    #[error("CACHE_ERROR: {0}")]
    Cache(String),

    /// HTTP client could not be built.
    #[error("CLIENT_ERROR: {0}")]
    Client(String),
}
