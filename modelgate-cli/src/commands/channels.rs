//! Channels command - list channels with model counts.

use anyhow::Result;
use tracing::info;

use super::{load_config, print_json, registry};
use crate::output::{ChannelOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the channels command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    info!("Listing channels");

    let config = load_config(cli).await?;
    let registry = registry(&config);

    let channels: Vec<ChannelOutput> = modelgate_providers::CapabilityRegistry::channels()
        .iter()
        .map(|channel| ChannelOutput {
            channel: channel.key(),
            models: registry.count(*channel),
        })
        .collect();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_channels_header());
            println!("{}", "─".repeat(24));
            for channel in &channels {
                println!("{}", formatter.format_channel_line(channel.channel, channel.models));
            }

            println!();
            println!(
                "Total: {} channels, {} models",
                channels.len(),
                channels.iter().map(|c| c.models).sum::<usize>()
            );
        }
        OutputFormat::Json => print_json(cli, &channels)?,
    }

    Ok(ExitCode::Success)
}
