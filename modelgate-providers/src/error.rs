//! Quota resolution errors.

use modelgate_core::CredentialError;
use modelgate_fetch::FetchError;
use thiserror::Error;

// ============================================================================
// Quota Error
// ============================================================================

/// Error returned by usage adapters and the quota resolver.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// The caller supplied a missing or malformed value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No credential is stored under the identifier.
    #[error("credential not found: {0}")]
    NotFound(String),

    /// The credential lacks a field the adapter needs.
    #[error("{field} not found in credential {id}")]
    MissingCredentialField {
        /// Credential identifier.
        id: String,
        /// Missing metadata key.
        field: &'static str,
    },

    /// The credential's provider type has no usage adapter.
    #[error("unsupported provider type '{provider}' for credential {id}")]
    UnsupportedProvider {
        /// Credential identifier.
        id: String,
        /// Recorded provider type.
        provider: String,
    },

    /// The provider could not be reached (transport failure, timeout, cancellation).
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] FetchError),

    /// The provider answered with a non-success status.
    #[error("API error (status {status}): {body}")]
    UpstreamRejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The provider's response did not have the expected shape.
    #[error("failed to parse {operation} response: {message}")]
    MalformedUpstreamResponse {
        /// Upstream operation whose response failed to parse.
        operation: &'static str,
        /// Parser message.
        message: String,
    },

    /// Secondary identifier discovery failed. Only ever logged.
    #[error("profile discovery failed: {0}")]
    DiscoveryFailed(String),
}

impl QuotaError {
    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::MissingCredentialField { .. } => "missing_credential_field",
            Self::UnsupportedProvider { .. } => "unsupported_provider",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamRejected { .. } => "upstream_rejected",
            Self::MalformedUpstreamResponse { .. } => "malformed_upstream_response",
            Self::DiscoveryFailed(_) => "discovery_failed",
        }
    }

    /// Returns true if the account needs to be re-authenticated.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MissingCredentialField { .. })
    }

    /// Returns true if trying again later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }

    /// Builds a parse failure for `operation`.
    pub fn malformed(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::MalformedUpstreamResponse {
            operation,
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for QuotaError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { status, body } => Self::UpstreamRejected { status, body },
            FetchError::Json(e) => Self::malformed("upstream", e),
            FetchError::InvalidRequest(message) => Self::InvalidInput(message),
            err if err.is_transport() => Self::UpstreamUnavailable(err),
            // Refused locally before anything was sent.
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl From<CredentialError> for QuotaError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::MissingField { id, field } => {
                Self::MissingCredentialField { id, field }
            }
            CredentialError::UnsupportedProvider { id, provider } => {
                Self::UnsupportedProvider { id, provider }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_maps_to_rejected() {
        let err = QuotaError::from(FetchError::Status {
            status: 429,
            body: "rate limited".into(),
        });
        assert_eq!(err.kind(), "upstream_rejected");
        let message = err.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("rate limited"));
    }

    #[test]
    fn test_timeout_and_cancel_are_transient() {
        let timeout = QuotaError::from(FetchError::Timeout(Duration::from_secs(30)));
        let cancelled = QuotaError::from(FetchError::Cancelled);
        assert!(timeout.is_transient());
        assert!(cancelled.is_transient());
        assert!(!timeout.requires_reauth());
    }

    #[test]
    fn test_local_refusal_is_not_transient() {
        let err = QuotaError::from(FetchError::DomainNotAllowed("evil.com".into()));
        assert_eq!(err.kind(), "invalid_input");
        assert!(!err.is_transient());
        assert!(err.to_string().contains("evil.com"));

        let err = QuotaError::from(FetchError::Transport("connection reset".into()));
        assert!(err.is_transient());
    }

    #[test]
    fn test_reauth_kinds() {
        assert!(QuotaError::NotFound("x".into()).requires_reauth());
        assert!(
            QuotaError::MissingCredentialField {
                id: "x".into(),
                field: "access_token",
            }
            .requires_reauth()
        );
        assert!(!QuotaError::InvalidInput("x".into()).requires_reauth());
        assert!(!QuotaError::UpstreamRejected { status: 500, body: String::new() }.is_transient());
    }

    #[test]
    fn test_credential_error_conversion() {
        let err = QuotaError::from(CredentialError::MissingField {
            id: "kiro-1.json".into(),
            field: "access_token",
        });
        assert_eq!(err.kind(), "missing_credential_field");
        assert_eq!(err.to_string(), "access_token not found in credential kiro-1.json");
    }

    #[test]
    fn test_malformed_message() {
        let err = QuotaError::malformed("usage", "expected value at line 1");
        assert_eq!(err.kind(), "malformed_upstream_response");
        assert!(err.to_string().contains("usage"));
    }
}
