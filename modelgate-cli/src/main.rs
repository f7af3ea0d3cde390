// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! modelgate CLI - model capabilities and provider quota from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Channels and their model counts
//! modelgate channels
//!
//! # Models served by one channel
//! modelgate models github-copilot
//!
//! # Which channel answers for a model id
//! modelgate lookup gemini-2.5-pro
//!
//! # Quota for stored accounts
//! modelgate quota kiro-1.json --format json --pretty
//! modelgate quota --all
//!
//! # Convert a saved Copilot /models response
//! modelgate convert-listing models.json
//!
//! # Write a default config file
//! modelgate config init
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use modelgate_providers::QuotaError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{accounts, channels, config, convert, lookup, models, quota};

// ============================================================================
// CLI Definition
// ============================================================================

/// modelgate CLI - model capabilities and provider quota.
#[derive(Parser)]
#[command(name = "modelgate")]
#[command(about = "Model capability registry and provider quota CLI")]
#[command(long_about = r"
modelgate answers two questions for an AI gateway:
which models a channel serves (and their limits), and how much quota a
stored provider account has left.

Quota providers:
  • Kiro / Amazon Q (kiro, amazonq)
  • GitHub Copilot (github-copilot)

Examples:
  modelgate channels                  # All channels
  modelgate models kiro               # One channel's models
  modelgate lookup claude-sonnet-4-5  # Global lookup
  modelgate quota --all               # Every stored account
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Auth directory holding one JSON file per account.
    #[arg(long, global = true)]
    pub auth_dir: Option<PathBuf>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List channels with their model counts.
    Channels,

    /// List the models a channel serves.
    #[command(visible_alias = "m")]
    Models(models::ModelsArgs),

    /// Find a model by id across all channels.
    #[command(visible_alias = "l")]
    Lookup(lookup::LookupArgs),

    /// Fetch quota usage for stored accounts.
    #[command(visible_alias = "q")]
    Quota(quota::QuotaArgs),

    /// List stored accounts.
    Accounts,

    /// Convert a saved Copilot model listing into descriptors.
    ConvertListing(convert::ConvertArgs),

    /// Inspect or initialize configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Bad argument (unknown channel, blank account id).
    InvalidInput = 2,
    /// The account must be re-authenticated or is not usable.
    AuthRequired = 3,
    /// The provider could not be reached; retrying later may work.
    Unavailable = 4,
    /// The provider answered with an error or an unreadable body.
    UpstreamError = 5,
}

impl ExitCode {
    /// Exit code for a quota failure.
    pub fn for_quota_error(err: &QuotaError) -> Self {
        match err {
            QuotaError::InvalidInput(_) => Self::InvalidInput,
            QuotaError::NotFound(_)
            | QuotaError::MissingCredentialField { .. }
            | QuotaError::UnsupportedProvider { .. } => Self::AuthRequired,
            QuotaError::UpstreamUnavailable(_) => Self::Unavailable,
            QuotaError::UpstreamRejected { .. } | QuotaError::MalformedUpstreamResponse { .. } => {
                Self::UpstreamError
            }
            QuotaError::DiscoveryFailed(_) => Self::Error,
        }
    }

    /// Exit code for any command error.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(quota) = err.downcast_ref::<QuotaError>() {
            return Self::for_quota_error(quota);
        }
        if err.downcast_ref::<commands::UsageError>().is_some() {
            return Self::InvalidInput;
        }
        Self::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("modelgate=debug,info")
    } else {
        EnvFilter::new("modelgate=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Channels => channels::run(&cli).await,
        Commands::Models(args) => models::run(args, &cli).await,
        Commands::Lookup(args) => lookup::run(args, &cli).await,
        Commands::Quota(args) => quota::run(args, &cli).await,
        Commands::Accounts => accounts::run(&cli).await,
        Commands::ConvertListing(args) => convert::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };

    if code != ExitCode::Success {
        std::process::exit(code as i32);
    }
}
