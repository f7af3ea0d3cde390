//! Accounts command - list stored accounts.

use anyhow::Result;
use modelgate_core::{CredentialStore, models::ACCESS_TOKEN_KEY};
use tracing::info;

use super::{load_config, open_store, print_json};
use crate::output::{AccountOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the accounts command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli).await?;
    let store = open_store(cli, &config).await?;
    info!(dir = %store.dir().display(), "Listing accounts");

    let accounts = account_rows(&store);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_accounts_header());
            println!("{}", "─".repeat(72));
            for account in &accounts {
                println!("{}", formatter.format_account_line(account));
            }

            println!();
            println!(
                "Total: {} accounts ({} with a quota adapter)",
                accounts.len(),
                accounts.iter().filter(|a| a.supported).count()
            );
        }
        OutputFormat::Json => print_json(cli, &accounts)?,
    }

    Ok(ExitCode::Success)
}

/// Summarizes every stored account.
fn account_rows(store: &impl CredentialStore) -> Vec<AccountOutput> {
    store
        .ids()
        .into_iter()
        .filter_map(|id| store.get_by_id(&id))
        .map(|record| AccountOutput {
            supported: record.provider_kind().is_some(),
            has_token: record.string_field(ACCESS_TOKEN_KEY).is_some(),
            id: record.id,
            provider: record.provider,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgate_core::CredentialRecord;
    use modelgate_store::MemoryCredentialStore;

    #[test]
    fn test_account_rows() {
        let store = MemoryCredentialStore::from_records([
            CredentialRecord::new("kiro-1.json", "kiro").with(ACCESS_TOKEN_KEY, "tok"),
            CredentialRecord::new("copilot.json", "github-copilot").with(ACCESS_TOKEN_KEY, ""),
            CredentialRecord::new("claude.json", "claude").with(ACCESS_TOKEN_KEY, "tok"),
        ]);

        let rows = account_rows(&store);
        assert_eq!(rows.len(), 3);

        let find = |id: &str| rows.iter().find(|r| r.id == id).unwrap();
        assert!(find("kiro-1.json").supported);
        assert!(find("kiro-1.json").has_token);
        assert!(!find("copilot.json").has_token);
        assert!(!find("claude.json").supported);
        assert_eq!(find("claude.json").provider, "claude");
    }
}
