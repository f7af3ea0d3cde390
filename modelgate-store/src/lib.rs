// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # modelgate Store
//!
//! Configuration and credential storage for modelgate.
//!
//! This crate provides:
//!
//! - **Config**: Timeouts, listing fallbacks, antigravity overrides, auth dir
//! - **Credential stores**: In-memory and auth-directory backed [`CredentialStore`]s
//! - **Persistence**: JSON file helpers with owner-only permissions
//!
//! ## Usage
//!
//! ```ignore
//! use modelgate_store::{Config, FileCredentialStore};
//!
//! let config = Config::load_from(&Config::default_path()).await?;
//! let store = FileCredentialStore::load_dir(config.resolve_auth_dir().await?).await?;
//! ```
//!
//! [`CredentialStore`]: modelgate_core::CredentialStore

pub mod config;
pub mod credentials;
pub mod error;
pub mod persistence;

pub use config::{
    Config, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, read_gateway_auth_dir,
};
pub use credentials::{FileCredentialStore, MemoryCredentialStore, parse_auth_file};
pub use error::StoreError;
pub use persistence::{
    default_auth_dir, default_config_dir, default_config_path, ensure_dir, expand_home, load_json,
    save_json,
};
