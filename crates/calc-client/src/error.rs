use thiserror::Error;

/// Every way a single flow invocation can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("{path} returned HTTP {status}{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Status {
        path: String,
        status: u16,
        detail: Option<String>,
    },

    #[error("failed to parse response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Setup(String),
}

impl ClientError {
    /// True when the server answered with a non-2xx status.
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}
