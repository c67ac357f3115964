//! Error types for the retrieval engine client.

use thiserror::Error;

/// Result type alias for retrieval engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for retrieval engine operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure. The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success response from the retrieval engine.
    #[error("retrieval engine: {message} (http_status={status})")]
    Backend { status: u16, message: String },

    /// Malformed response body.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new backend error.
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Error::Backend {
            status,
            message: message.into(),
        }
    }

    /// Returns true if the engine rejected the request (4xx).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Backend { status, .. } if (400..500).contains(status))
    }

    /// Returns true if the failure was on the engine side (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Backend { status, .. } if *status >= 500)
    }
}
