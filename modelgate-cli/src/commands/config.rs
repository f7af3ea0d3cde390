//! Config command - inspect and initialize configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use modelgate_store::{Config, expand_home};
use tracing::info;

use super::{UsageError, load_config, print_json};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the configuration file and auth directory paths.
    Path,

    /// Write a config file holding the defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await?,
        ConfigAction::Path => show_paths(cli).await?,
        ConfigAction::Init { force } => {
            let path = config_path(cli);
            init_config(&path, *force).await?;
            if !cli.quiet {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(ExitCode::Success)
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map_or_else(Config::default_path, expand_home)
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;

    match cli.format {
        OutputFormat::Text => {
            println!("modelgate Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!(
                "Auth dir:        {}",
                config
                    .auth_dir
                    .as_ref()
                    .map_or_else(|| "(gateway or default)".to_string(), |p| p.display().to_string())
            );
            if let Some(gateway) = &config.gateway_config {
                println!("Gateway config:  {}", gateway.display());
            }
            println!("Request timeout: {}s", config.request_timeout_secs);
            println!(
                "Listing limits:  context {} / output {}",
                config.listing_defaults.context_length,
                config.listing_defaults.max_completion_tokens
            );
            println!(
                "Antigravity:     {}",
                config
                    .antigravity_models
                    .as_ref()
                    .map_or_else(|| "built-in".to_string(), |m| format!("{} overrides", m.len()))
            );
        }
        OutputFormat::Json => print_json(cli, &config)?,
    }

    Ok(())
}

async fn show_paths(cli: &Cli) -> Result<()> {
    let config_file = config_path(cli);
    let config = load_config(cli).await?;
    let auth_dir = match &cli.auth_dir {
        Some(dir) => expand_home(dir),
        None => config.resolve_auth_dir().await?,
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config file: {}", config_file.display());
            println!("Auth dir:    {}", auth_dir.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_file": config_file.display().to_string(),
                "auth_dir": auth_dir.display().to_string(),
            });
            print_json(cli, &paths)?;
        }
    }

    Ok(())
}

/// Writes the default configuration to `path`.
async fn init_config(path: &Path, force: bool) -> Result<()> {
    if !force && tokio::fs::try_exists(path).await? {
        return Err(UsageError(format!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        ))
        .into());
    }

    Config::default()
        .save_to(path)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Initialized configuration");
    Ok(())
}
