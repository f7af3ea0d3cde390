//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for outbound HTTP calls.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The call exceeded its time budget.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the call.
    #[error("Request cancelled")]
    Cancelled,

    /// The provider answered with a non-success status.
    #[error("API error (status {status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request could not be built (e.g. a token with invalid header bytes).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Generic transport failure reported by a non-reqwest transport.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Returns true if the call never produced a provider response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::Cancelled | Self::Transport(_)
        )
    }
}
