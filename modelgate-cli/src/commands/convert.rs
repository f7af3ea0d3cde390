//! Convert-listing command - turn a saved Copilot `/models` response into descriptors.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use modelgate_core::{ListingDefaults, ModelDescriptor};
use modelgate_providers::descriptors_from_listing;
use std::path::Path;
use tracing::info;

use super::{load_config, print_json};
use crate::output::TextFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the convert-listing command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Saved listing (`{"data": [...]}` or a bare array).
    pub file: PathBuf,

    /// Creation timestamp stamped on every descriptor (defaults to now).
    #[arg(long)]
    pub created: Option<i64>,
}

/// Runs the convert-listing command.
pub async fn run(args: &ConvertArgs, cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli).await?;

    let created = args.created.unwrap_or_else(|| Utc::now().timestamp());
    let models = load_listing(&args.file, &config.listing_defaults, created).await?;
    info!(count = models.len(), "Converted listing");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_models(&models));
            println!();
            println!("Total: {} models", models.len());
        }
        OutputFormat::Json => print_json(cli, &models)?,
    }

    Ok(ExitCode::Success)
}

/// Reads and converts a saved listing.
async fn load_listing(
    path: &Path,
    defaults: &ListingDefaults,
    created: i64,
) -> Result<Vec<ModelDescriptor>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    descriptors_from_listing(&json, defaults, created)
        .with_context(|| format!("{} is not a model listing", path.display()))
}
