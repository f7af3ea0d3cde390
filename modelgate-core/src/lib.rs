// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # modelgate Core
//!
//! Core types, models, and traits shared by all modelgate crates.
//!
//! ## Key Types
//!
//! ### Capabilities
//! - [`Channel`] - Internal routing family
//! - [`ModelDescriptor`] - Capability metadata for one model
//! - [`ReasoningSupport`] - Thinking budget or effort levels
//!
//! ### Credentials
//! - [`CredentialRecord`] - Untyped record from the credential store
//! - [`ProviderCredentials`] - Validated per-provider credentials
//! - [`CredentialStore`] - Credential store seam
//!
//! ### Usage
//! - [`UsageSnapshot`] - Normalized quota usage
//! - [`QuotaCategory`] - Per-category quota detail
//! - [`ProviderKind`] - Provider families with a usage adapter

pub mod error;
pub mod models;
pub mod traits;

pub use error::CoreError;

pub use models::{
    // Capabilities
    Channel,
    EffortLevel,
    ListingDefaults,
    ModelDescriptor,
    ModelOverride,
    ModelOverrideMap,
    ReasoningSupport,
    // Credentials
    CopilotCredentials,
    CredentialError,
    CredentialRecord,
    KiroCredentials,
    ProviderCredentials,
    // Usage
    ProviderKind,
    QuotaCategory,
    QuotaCategoryKind,
    UsageSnapshot,
};

pub use traits::CredentialStore;
