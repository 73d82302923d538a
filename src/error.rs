//! Error types for label requests.

/// Why a label request did not succeed.
///
/// Callers only ever surface a single "request failed" alert; the variants
/// exist so the failure can be logged with some detail.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request did not finish within its timeout and was aborted
    #[error("request to {endpoint} timed out after {timeout_ms} ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// The request could not be sent or the connection failed
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status
    #[error("server responded with status {0}")]
    Status(u16),

    /// The request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// Another label request is still in flight
    #[error("another request is still in flight")]
    Busy,
}
