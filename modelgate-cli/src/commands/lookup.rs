//! Lookup command - find a model across all channels.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{load_config, print_json, registry};
use crate::output::{ErrorOutput, LookupOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// Model id.
    pub id: String,

    /// Also list every channel defining the id.
    #[arg(long)]
    pub all_channels: bool,
}

/// Runs the lookup command.
pub async fn run(args: &LookupArgs, cli: &Cli) -> Result<ExitCode> {
    info!(id = %args.id, "Looking up model");

    let config = load_config(cli).await?;
    let registry = registry(&config);

    let Some((channel, model)) = registry.lookup_with_channel(&args.id) else {
        match cli.format {
            OutputFormat::Text => {
                if !cli.quiet {
                    eprintln!("Model '{}' not found in any channel", args.id);
                }
            }
            OutputFormat::Json => print_json(
                cli,
                &ErrorOutput {
                    error: format!("model '{}' not found", args.id),
                    kind: "not_found",
                },
            )?,
        }
        return Ok(ExitCode::Error);
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_model_detail(channel.key(), &model));

            if args.all_channels {
                let keys: Vec<&str> = registry
                    .channels_defining(&args.id)
                    .iter()
                    .map(|c| c.key())
                    .collect();
                println!("Defined by: {}", keys.join(", "));
            }
        }
        OutputFormat::Json => print_json(
            cli,
            &LookupOutput {
                channel: channel.key(),
                model: &model,
            },
        )?,
    }

    Ok(ExitCode::Success)
}
