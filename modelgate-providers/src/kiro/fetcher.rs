//! Kiro usage adapter.

use async_trait::async_trait;
use modelgate_core::{KiroCredentials, ProviderCredentials, ProviderKind, UsageSnapshot};
use modelgate_fetch::FetchContext;
use tracing::{debug, info, instrument, warn};

use super::api::KiroApiClient;
use crate::adapter::{UsageAdapter, mismatched};
use crate::error::QuotaError;

// ============================================================================
// Adapter
// ============================================================================

/// Discovery-then-fetch adapter for Kiro and Amazon Q accounts.
#[derive(Debug, Clone, Default)]
pub struct KiroUsageAdapter {
    api: KiroApiClient,
}

impl KiroUsageAdapter {
    /// Creates an adapter for the production endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter for a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            api: KiroApiClient::with_endpoint(endpoint),
        }
    }

    /// Returns the underlying API client.
    pub fn api(&self) -> &KiroApiClient {
        &self.api
    }

    /// Fetches usage for one Kiro account.
    ///
    /// # Errors
    ///
    /// Returns an error if the usage call fails. A failed profile lookup is
    /// logged and the usage call goes ahead without a profile ARN.
    #[instrument(skip(self, ctx, credentials))]
    pub async fn fetch(
        &self,
        ctx: &FetchContext,
        credentials: &KiroCredentials,
    ) -> Result<UsageSnapshot, QuotaError> {
        let profile_arn = match credentials.profile_arn.as_deref() {
            Some(arn) => Some(arn.to_string()),
            None => self.discover_profile(ctx, &credentials.access_token).await,
        };

        let limits = self
            .api
            .get_usage_limits(ctx, &credentials.access_token, profile_arn.as_deref())
            .await?;

        let snapshot = limits.to_snapshot();
        info!(
            plan = %snapshot.plan_label,
            used = snapshot.current_usage,
            limit = snapshot.usage_limit,
            "Fetched Kiro usage"
        );
        Ok(snapshot)
    }

    /// Looks up the first non-empty profile ARN. Never fails.
    async fn discover_profile(&self, ctx: &FetchContext, token: &str) -> Option<String> {
        debug!("No profile ARN stored, listing profiles");

        match self.api.list_profiles(ctx, token).await {
            Ok(arns) => {
                let arn = arns.into_iter().find(|arn| !arn.is_empty());
                if arn.is_none() {
                    warn!("Profile listing returned no ARN, continuing without one");
                }
                arn
            }
            Err(e) => {
                let err = QuotaError::DiscoveryFailed(e.to_string());
                warn!(error = %err, "Continuing without profile ARN");
                None
            }
        }
    }
}

#[async_trait]
impl UsageAdapter for KiroUsageAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Kiro
    }

    async fn fetch_usage(
        &self,
        ctx: &FetchContext,
        credentials: &ProviderCredentials,
    ) -> Result<UsageSnapshot, QuotaError> {
        match credentials {
            ProviderCredentials::Kiro(kiro) => self.fetch(ctx, kiro).await,
            other => Err(mismatched(ProviderKind::Kiro, other)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
