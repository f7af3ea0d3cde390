//! Copilot usage adapter.

use async_trait::async_trait;
use modelgate_core::{CopilotCredentials, ProviderCredentials, ProviderKind, UsageSnapshot};
use modelgate_fetch::FetchContext;
use tracing::{info, instrument};

use super::api::CopilotApiClient;
use super::parser::CopilotUsageResponse;
use crate::adapter::{UsageAdapter, mismatched};
use crate::error::QuotaError;

/// Direct-fetch adapter for GitHub Copilot accounts.
#[derive(Debug, Clone, Default)]
pub struct CopilotUsageAdapter {
    api: CopilotApiClient,
}

impl CopilotUsageAdapter {
    /// Creates an adapter for api.github.com.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter for a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: CopilotApiClient::with_base_url(base_url),
        }
    }

    /// Fetches the raw quota response.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the body cannot be parsed.
    pub async fn fetch_raw(
        &self,
        ctx: &FetchContext,
        credentials: &CopilotCredentials,
    ) -> Result<CopilotUsageResponse, QuotaError> {
        self.api
            .fetch_user_quota(ctx, &credentials.access_token)
            .await
    }

    /// Fetches and normalizes usage for one Copilot account.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the body cannot be parsed.
    #[instrument(skip(self, ctx, credentials))]
    pub async fn fetch(
        &self,
        ctx: &FetchContext,
        credentials: &CopilotCredentials,
    ) -> Result<UsageSnapshot, QuotaError> {
        let snapshot = self.fetch_raw(ctx, credentials).await?.to_snapshot();
        info!(
            plan = %snapshot.plan_label,
            categories = snapshot.categories.len(),
            "Fetched Copilot usage"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl UsageAdapter for CopilotUsageAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Copilot
    }

    async fn fetch_usage(
        &self,
        ctx: &FetchContext,
        credentials: &ProviderCredentials,
    ) -> Result<UsageSnapshot, QuotaError> {
        match credentials {
            ProviderCredentials::Copilot(copilot) => self.fetch(ctx, copilot).await,
            other => Err(mismatched(ProviderKind::Copilot, other)),
        }
    }
}
