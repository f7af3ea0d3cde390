//! Configurable capability defaults and per-model overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::descriptor::ReasoningSupport;

/// Context length used when a model listing omits it.
pub const DEFAULT_CONTEXT_LENGTH: u32 = 128_000;

/// Output cap used when a model listing omits it.
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 16_384;

// ============================================================================
// Listing Defaults
// ============================================================================

/// Fallback limits applied to listing-derived descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDefaults {
    /// Context window used when the listing reports zero.
    pub context_length: u32,
    /// Output cap used when the listing reports zero.
    pub max_completion_tokens: u32,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            context_length: DEFAULT_CONTEXT_LENGTH,
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
        }
    }
}

impl ListingDefaults {
    /// Returns `value`, or the context fallback when it is zero.
    pub fn context_or_default(&self, value: u32) -> u32 {
        if value == 0 { self.context_length } else { value }
    }

    /// Returns `value`, or the output fallback when it is zero.
    pub fn output_or_default(&self, value: u32) -> u32 {
        if value == 0 {
            self.max_completion_tokens
        } else {
            value
        }
    }
}

// ============================================================================
// Model Override
// ============================================================================

/// Keyed override map for config-derived channels.
///
/// A `None` value marks an entry that is present in configuration but
/// disabled.
pub type ModelOverrideMap = BTreeMap<String, Option<ModelOverride>>;

/// Capability override for one model of a config-derived channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOverride {
    /// Reasoning capability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<ReasoningSupport>,
    /// Output cap in tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

impl ModelOverride {
    /// Creates an override with both fields set.
    pub fn new(thinking: Option<ReasoningSupport>, max_completion_tokens: Option<u32>) -> Self {
        Self {
            thinking,
            max_completion_tokens,
        }
    }
}
