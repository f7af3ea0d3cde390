//! Quota command - resolve usage for stored accounts.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use futures::future::join_all;
use modelgate_core::{CredentialStore, UsageSnapshot};
use modelgate_providers::{QuotaError, QuotaResolver};
use tracing::{debug, info, warn};

use super::{UsageError, fetch_context, load_config, open_store};
use crate::output::{JsonFormatter, QuotaOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the quota command.
#[derive(Args)]
pub struct QuotaArgs {
    /// Account ids (auth file names, e.g. kiro-1.json).
    pub accounts: Vec<String>,

    /// Resolve every stored account.
    #[arg(long, conflicts_with = "accounts")]
    pub all: bool,
}

/// Runs the quota command.
pub async fn run(args: &QuotaArgs, cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli).await?;
    let store = Arc::new(open_store(cli, &config).await?);

    let accounts = if args.all {
        store.ids()
    } else if args.accounts.is_empty() {
        return Err(UsageError("pass one or more account ids, or --all".to_string()).into());
    } else {
        args.accounts.clone()
    };

    info!(count = accounts.len(), "Resolving quota");

    let ctx = fetch_context(&config)?;
    let cancel = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding requests");
            cancel.cancel();
        }
    });

    let resolver = QuotaResolver::new(store);
    let results: Vec<Result<UsageSnapshot, QuotaError>> = join_all(
        accounts
            .iter()
            .map(|account| resolver.resolve_usage(&ctx, account)),
    )
    .await;

    output_results(&accounts, &results, cli)?;

    let code = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .map_or(ExitCode::Success, ExitCode::for_quota_error);
    debug!(?code, "Quota resolution finished");
    Ok(code)
}

fn output_results(
    accounts: &[String],
    results: &[Result<UsageSnapshot, QuotaError>],
    cli: &Cli,
) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let blocks: Vec<String> = accounts
                .iter()
                .zip(results)
                .map(|(account, result)| match result {
                    Ok(snapshot) => formatter.format_quota(account, snapshot),
                    Err(e) => formatter.format_error(account, &e.to_string()),
                })
                .collect();
            println!("{}", blocks.join("\n\n"));
        }
        OutputFormat::Json => {
            let outputs: Vec<QuotaOutput<'_>> = accounts
                .iter()
                .zip(results)
                .map(|(account, result)| QuotaOutput::new(account, result))
                .collect();
            println!("{}", JsonFormatter::new(cli.pretty).format_quota(&outputs)?);
        }
    }
    Ok(())
}
