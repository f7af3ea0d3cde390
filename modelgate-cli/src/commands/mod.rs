//! CLI command implementations.

pub mod accounts;
pub mod channels;
pub mod config;
pub mod convert;
pub mod lookup;
pub mod models;
pub mod quota;

use anyhow::{Context, Result};
use modelgate_fetch::{FetchContext, HttpClient};
use modelgate_providers::CapabilityRegistry;
use modelgate_store::{Config, FileCredentialStore, expand_home};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::Cli;
use crate::output::JsonFormatter;

/// Hosts the quota adapters talk to.
const UPSTREAM_DOMAINS: [&str; 2] = ["api.github.com", "amazonaws.com"];

/// A command was invoked with arguments it cannot act on.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Loads the config named by `--config`, or the default one.
pub async fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli
        .config
        .as_deref()
        .map_or_else(Config::default_path, expand_home);
    debug!(path = %path.display(), "Loading config");

    Config::load_from(&path)
        .await
        .with_context(|| format!("failed to load config {}", path.display()))
}

/// Builds the capability registry, applying configured antigravity overrides.
pub fn registry(config: &Config) -> CapabilityRegistry {
    match &config.antigravity_models {
        Some(overrides) => CapabilityRegistry::with_antigravity(overrides.clone()),
        None => CapabilityRegistry::new(),
    }
}

/// Opens the auth directory from `--auth-dir` or the config.
pub async fn open_store(cli: &Cli, config: &Config) -> Result<FileCredentialStore> {
    let dir = match &cli.auth_dir {
        Some(dir) => expand_home(dir),
        None => config.resolve_auth_dir().await?,
    };

    FileCredentialStore::load_dir(&dir)
        .await
        .with_context(|| format!("failed to load accounts from {}", dir.display()))
}

/// Builds the fetch context for upstream calls.
pub fn fetch_context(config: &Config) -> Result<FetchContext> {
    let timeout = config.request_timeout();
    let client = HttpClient::with_timeout(timeout)?.allow_domains(UPSTREAM_DOMAINS);

    Ok(FetchContext::builder()
        .http(Arc::new(client))
        .timeout(timeout)
        .build()?)
}

/// Prints `data` as JSON honoring `--pretty`.
pub fn print_json<T: Serialize + ?Sized>(cli: &Cli, data: &T) -> Result<()> {
    println!("{}", JsonFormatter::new(cli.pretty).format(data)?);
    Ok(())
}
