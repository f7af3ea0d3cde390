//! Configuration management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use modelgate_core::{ListingDefaults, ModelOverrideMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_auth_dir, default_config_path, expand_home, load_json, save_json};

/// Default per-call timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Largest accepted per-call timeout in seconds.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

// ============================================================================
// Config
// ============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding per-account auth files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_dir: Option<PathBuf>,

    /// Gateway YAML config whose `auth-dir` is used when `auth_dir` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_config: Option<PathBuf>,

    /// Timeout for a single upstream call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fallback limits for listing-derived descriptors.
    #[serde(default)]
    pub listing_defaults: ListingDefaults,

    /// Antigravity model overrides; the built-in map is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antigravity_models: Option<ModelOverrideMap>,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_dir: None,
            gateway_config: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            listing_defaults: ListingDefaults::default(),
            antigravity_models: None,
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        match load_json::<Self>(path).await {
            Ok(config) => {
                config.validate()?;
                info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] for a timeout outside
    /// `1..=MAX_REQUEST_TIMEOUT_SECS` or zero fallback limits.
    pub fn validate(&self) -> Result<(), StoreError> {
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(StoreError::Config(format!(
                "request_timeout_secs must be between 1 and {MAX_REQUEST_TIMEOUT_SECS}"
            )));
        }
        if self.listing_defaults.context_length == 0
            || self.listing_defaults.max_completion_tokens == 0
        {
            return Err(StoreError::Config(
                "listing_defaults limits must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the per-call timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves the auth directory.
    ///
    /// Order: `auth_dir`, then the gateway config's `auth-dir`, then
    /// `~/.cli-proxy-api`.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway config is set but cannot be read.
    pub async fn resolve_auth_dir(&self) -> Result<PathBuf, StoreError> {
        if let Some(dir) = &self.auth_dir {
            return Ok(expand_home(dir));
        }
        if let Some(gateway) = &self.gateway_config {
            if let Some(dir) = read_gateway_auth_dir(&expand_home(gateway)).await? {
                return Ok(dir);
            }
        }
        Ok(default_auth_dir())
    }
}

// ============================================================================
// Gateway YAML
// ============================================================================

/// The part of the gateway's YAML config this crate reads.
#[derive(Debug, Default, Deserialize)]
struct GatewayConfig {
    #[serde(default, rename = "auth-dir")]
    auth_dir: Option<String>,
}

/// Reads `auth-dir` from a gateway YAML config, expanding `~`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub async fn read_gateway_auth_dir(path: &Path) -> Result<Option<PathBuf>, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_gateway_auth_dir(&content)
}

fn parse_gateway_auth_dir(content: &str) -> Result<Option<PathBuf>, StoreError> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    let gateway: Option<GatewayConfig> = serde_yaml::from_str(content)?;
    Ok(gateway
        .and_then(|g| g.auth_dir)
        .map(|dir| dir.trim().to_string())
        .filter(|dir| !dir.is_empty())
        .map(|dir| expand_home(Path::new(&dir))))
}

// ============================================================================
// Tests
// ============================================================================
