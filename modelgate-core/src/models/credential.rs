//! Credential records and their typed per-provider form.
//!
//! The credential store hands out [`CredentialRecord`]s whose metadata is an
//! untyped JSON map. [`ProviderCredentials::try_from`] validates that map once
//! and produces strongly shaped data for the usage adapters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::provider::ProviderKind;

/// Metadata key holding the bearer/access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Metadata key holding the Kiro profile ARN.
pub const PROFILE_ARN_KEY: &str = "profile_arn";

// ============================================================================
// Credential Record
// ============================================================================

/// A stored credential as the credential store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Opaque account identifier.
    pub id: String,
    /// Provider type string (e.g. "kiro", "github-copilot").
    #[serde(rename = "type", default)]
    pub provider: String,
    /// Provider-specific secrets and auxiliary fields.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl CredentialRecord {
    /// Creates a record with empty metadata.
    pub fn new(id: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            metadata: Map::new(),
        }
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns a non-empty string metadata value.
    ///
    /// Missing keys, non-string values, and empty strings all yield `None`.
    pub fn string_field(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns the provider kind recorded for this credential.
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        ProviderKind::from_credential_type(&self.provider)
    }
}

// ============================================================================
// Typed Credentials
// ============================================================================

/// Kiro credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct KiroCredentials {
    /// Bearer token for CodeWhisperer.
    pub access_token: String,
    /// Profile ARN; discovered at fetch time when absent.
    pub profile_arn: Option<String>,
}

/// GitHub Copilot credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct CopilotCredentials {
    /// GitHub OAuth token.
    pub access_token: String,
}

// Tokens never reach logs through Debug.
impl std::fmt::Debug for KiroCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KiroCredentials")
            .field("access_token", &"<redacted>")
            .field("profile_arn", &self.profile_arn)
            .finish()
    }
}

impl std::fmt::Debug for CopilotCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopilotCredentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Validated, provider-shaped credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCredentials {
    /// Kiro / Amazon Q.
    Kiro(KiroCredentials),
    /// GitHub Copilot.
    Copilot(CopilotCredentials),
}

impl ProviderCredentials {
    /// Returns the provider kind these credentials belong to.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Kiro(_) => ProviderKind::Kiro,
            Self::Copilot(_) => ProviderKind::Copilot,
        }
    }
}

/// Errors converting a [`CredentialRecord`] into [`ProviderCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// A required metadata field is absent or empty.
    #[error("{field} not found in credential {id}")]
    MissingField {
        /// Credential identifier.
        id: String,
        /// Missing metadata key.
        field: &'static str,
    },

    /// The recorded provider type has no usage adapter.
    #[error("unsupported provider type '{provider}' for credential {id}")]
    UnsupportedProvider {
        /// Credential identifier.
        id: String,
        /// Recorded provider type.
        provider: String,
    },
}

impl TryFrom<&CredentialRecord> for ProviderCredentials {
    type Error = CredentialError;

    fn try_from(record: &CredentialRecord) -> Result<Self, Self::Error> {
        let kind = record
            .provider_kind()
            .ok_or_else(|| CredentialError::UnsupportedProvider {
                id: record.id.clone(),
                provider: record.provider.clone(),
            })?;

        let access_token = record
            .string_field(ACCESS_TOKEN_KEY)
            .ok_or_else(|| CredentialError::MissingField {
                id: record.id.clone(),
                field: ACCESS_TOKEN_KEY,
            })?
            .to_string();

        Ok(match kind {
            ProviderKind::Kiro => Self::Kiro(KiroCredentials {
                access_token,
                profile_arn: record.string_field(PROFILE_ARN_KEY).map(str::to_string),
            }),
            ProviderKind::Copilot => Self::Copilot(CopilotCredentials { access_token }),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kiro_with_profile() {
        let record = CredentialRecord::new("kiro-1.json", "kiro")
            .with(ACCESS_TOKEN_KEY, "abc")
            .with(PROFILE_ARN_KEY, "arn:aws:codewhisperer:us-east-1:1:profile/X");

        let creds = ProviderCredentials::try_from(&record).unwrap();
        let ProviderCredentials::Kiro(kiro) = creds else {
            panic!("expected kiro credentials");
        };
        assert_eq!(kiro.access_token, "abc");
        assert_eq!(
            kiro.profile_arn.as_deref(),
            Some("arn:aws:codewhisperer:us-east-1:1:profile/X")
        );
    }

    #[test]
    fn test_empty_profile_is_absent() {
        let record = CredentialRecord::new("k", "kiro")
            .with(ACCESS_TOKEN_KEY, "abc")
            .with(PROFILE_ARN_KEY, "");

        let Ok(ProviderCredentials::Kiro(kiro)) = ProviderCredentials::try_from(&record) else {
            panic!("expected kiro credentials");
        };
        assert_eq!(kiro.profile_arn, None);
    }

    #[test]
    fn test_missing_token() {
        let record = CredentialRecord::new("copilot-a", "github-copilot").with("username", "octo");
        let err = ProviderCredentials::try_from(&record).unwrap_err();
        assert_eq!(
            err,
            CredentialError::MissingField {
                id: "copilot-a".to_string(),
                field: ACCESS_TOKEN_KEY,
            }
        );
    }

    #[test]
    fn test_non_string_token_is_missing() {
        let record = CredentialRecord::new("c", "github-copilot").with(ACCESS_TOKEN_KEY, json!(42));
        assert!(matches!(
            ProviderCredentials::try_from(&record),
            Err(CredentialError::MissingField { .. })
        ));
    }

    #[test]
    fn test_unsupported_provider() {
        let record = CredentialRecord::new("c", "claude").with(ACCESS_TOKEN_KEY, "abc");
        assert!(matches!(
            ProviderCredentials::try_from(&record),
            Err(CredentialError::UnsupportedProvider { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = ProviderCredentials::Copilot(CopilotCredentials {
            access_token: "ghu_secret".to_string(),
        });
        let debug = format!("{creds:?}");
        assert!(!debug.contains("ghu_secret"));
        assert!(debug.contains("redacted"));
    }
}
