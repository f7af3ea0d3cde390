//! Models command - list a channel's models.

use anyhow::Result;
use clap::Args;
use modelgate_core::Channel;
use tracing::{info, warn};

use super::{load_config, print_json, registry};
use crate::output::TextFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    /// Channel key (e.g. claude, github-copilot, kiro, antigravity).
    pub channel: String,
}

/// Runs the models command.
pub async fn run(args: &ModelsArgs, cli: &Cli) -> Result<ExitCode> {
    info!(channel = %args.channel, "Listing models");

    let config = load_config(cli).await?;
    let models = registry(&config).models_for_channel(&args.channel);

    if Channel::parse(&args.channel).is_none() {
        warn!(channel = %args.channel, "Unknown channel");
    }

    match cli.format {
        OutputFormat::Text => {
            if models.is_empty() {
                if !cli.quiet {
                    eprintln!("No models for channel '{}'", args.channel.trim());
                }
            } else {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_models(&models));
                println!();
                println!("Total: {} models", models.len());
            }
        }
        OutputFormat::Json => print_json(cli, &*models)?,
    }

    Ok(ExitCode::Success)
}
