//! Provider-related types.
//!
//! This module contains types related to quota-reporting providers:
//! - [`ProviderKind`] - Enum of provider families with a usage adapter

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Provider Kind
// ============================================================================

/// Provider families that expose a usage-accounting endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Kiro / Amazon Q (AWS CodeWhisperer back end)
    Kiro,
    /// GitHub Copilot
    Copilot,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Kiro => "Kiro",
            Self::Copilot => "GitHub Copilot",
        }
    }

    /// Returns all provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Kiro, Self::Copilot]
    }

    /// Returns the credential type string the credential store records for
    /// this provider.
    pub fn credential_type(&self) -> &'static str {
        match self {
            Self::Kiro => "kiro",
            Self::Copilot => "github-copilot",
        }
    }

    /// Maps a credential store type string to a provider kind.
    ///
    /// Amazon Q accounts share the Kiro back end and resolve to [`Self::Kiro`].
    /// Matching ignores case and surrounding whitespace.
    pub fn from_credential_type(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "kiro" | "amazonq" | "amazon-q" => Some(Self::Kiro),
            "github-copilot" | "copilot" => Some(Self::Copilot),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.credential_type())
    }
}
