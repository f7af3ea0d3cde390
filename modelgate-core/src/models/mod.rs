//! Domain models for modelgate.
//!
//! This module contains the core data structures representing model
//! capabilities, provider credentials, and normalized quota usage.
//!
//! ## Submodules
//!
//! - [`channel`] - Routing channels ([`Channel`])
//! - [`descriptor`] - Capability metadata ([`ModelDescriptor`], [`ReasoningSupport`])
//! - [`credential`] - Stored and typed credentials
//! - [`limits`] - Listing fallbacks and per-model overrides
//! - [`provider`] - Provider families with usage adapters
//! - [`usage`] - Normalized usage ([`UsageSnapshot`], [`QuotaCategory`])

pub mod channel;
pub mod credential;
pub mod descriptor;
pub mod limits;
pub mod provider;
pub mod usage;

// Re-export everything at the models level
pub use channel::Channel;
pub use credential::{
    ACCESS_TOKEN_KEY, CopilotCredentials, CredentialError, CredentialRecord, KiroCredentials,
    PROFILE_ARN_KEY, ProviderCredentials,
};
pub use descriptor::{EffortLevel, ModelDescriptor, ReasoningSupport};
pub use limits::{
    DEFAULT_CONTEXT_LENGTH, DEFAULT_MAX_COMPLETION_TOKENS, ListingDefaults, ModelOverride,
    ModelOverrideMap,
};
pub use provider::ProviderKind;
pub use usage::{QuotaCategory, QuotaCategoryKind, UsageSnapshot};
