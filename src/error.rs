//! Error types for the memehub client.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the hub or handling local state.
#[derive(Debug, Error)]
pub enum HubError {
    /// The client has no endpoint; call `initialize` or construct with a URL.
    #[error("hub endpoint not configured")]
    NotConfigured,

    /// Transport-level failure (connect, DNS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The hub answered with a non-success status.
    #[error("hub returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The hub's reply was not the expected JSON shape.
    #[error("failed to parse JSON: {source}")]
    JsonParse {
        #[source]
        source: serde_json::Error,
    },

    /// Local data could not be serialized to JSON.
    #[error("failed to serialize JSON: {0}")]
    JsonSerialize(#[source] serde_json::Error),

    /// Filesystem failure while saving or loading local state.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for memehub client operations.
pub type Result<T> = std::result::Result<T, HubError>;

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::JsonParse { source: err }
    }
}
