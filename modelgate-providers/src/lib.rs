// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # modelgate Providers
//!
//! Model capability tables and provider quota normalization.
//!
//! ## Capability Registry
//!
//! [`CapabilityRegistry`] answers "which models does channel X expose" and
//! "what are the limits of model Y" from immutable per-channel tables. The
//! `antigravity` channel is the exception: it is derived from a keyed
//! override map on every call.
//!
//! ## Quota Normalization
//!
//! | Provider | Adapter | Shape |
//! |----------|---------|-------|
//! | Kiro / Amazon Q | [`KiroUsageAdapter`] | Discovery (`ListProfiles`) then `GetUsageLimits` |
//! | GitHub Copilot | [`CopilotUsageAdapter`] | Single `GET /copilot_internal/user` |
//!
//! [`QuotaResolver`] ties them together: it looks up the stored credential,
//! validates it into [`modelgate_core::ProviderCredentials`], and dispatches
//! to the matching adapter.
//!
//! ## Usage
//!
//! ```ignore
//! use modelgate_fetch::FetchContext;
//! use modelgate_providers::{CapabilityRegistry, QuotaResolver};
//!
//! let registry = CapabilityRegistry::new();
//! let claude = registry.models_for_channel("claude");
//!
//! let resolver = QuotaResolver::new(store);
//! let ctx = FetchContext::builder().build()?;
//! let snapshot = resolver.resolve_usage(&ctx, "kiro-1.json").await?;
//! ```

pub mod adapter;
pub mod catalog;
pub mod error;
pub mod listing;
pub mod registry;
pub mod resolver;

// Provider modules (alphabetical)
pub mod copilot;
pub mod kiro;

#[cfg(test)]
mod testing;

pub use adapter::UsageAdapter;
pub use copilot::{CopilotApiClient, CopilotUsageAdapter, CopilotUsageResponse};
pub use error::QuotaError;
pub use kiro::{KiroApiClient, KiroUsageAdapter, KiroUsageLimits};
pub use listing::{ListedModel, descriptors_from_listing};
pub use registry::{CapabilityRegistry, LOOKUP_PRIORITY};
pub use resolver::QuotaResolver;
