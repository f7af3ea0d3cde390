//! Quota resolution: account identifier in, normalized snapshot out.

use std::sync::Arc;

use modelgate_core::{CredentialStore, ProviderCredentials, ProviderKind, UsageSnapshot};
use modelgate_fetch::FetchContext;
use tracing::{debug, instrument, warn};

use crate::adapter::UsageAdapter;
use crate::copilot::CopilotUsageAdapter;
use crate::error::QuotaError;
use crate::kiro::KiroUsageAdapter;

// ============================================================================
// Resolver
// ============================================================================

/// Resolves usage for stored accounts.
///
/// Holds no per-request state; one resolver serves concurrent calls.
pub struct QuotaResolver {
    store: Arc<dyn CredentialStore>,
    kiro: Arc<dyn UsageAdapter>,
    copilot: Arc<dyn UsageAdapter>,
}

impl QuotaResolver {
    /// Creates a resolver with the production adapters.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            kiro: Arc::new(KiroUsageAdapter::new()),
            copilot: Arc::new(CopilotUsageAdapter::new()),
        }
    }

    /// Replaces the adapter serving the adapter's own provider family.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn UsageAdapter>) -> Self {
        match adapter.provider() {
            ProviderKind::Kiro => self.kiro = adapter,
            ProviderKind::Copilot => self.copilot = adapter,
        }
        self
    }

    /// Returns the credential store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    fn adapter(&self, kind: ProviderKind) -> &dyn UsageAdapter {
        match kind {
            ProviderKind::Kiro => self.kiro.as_ref(),
            ProviderKind::Copilot => self.copilot.as_ref(),
        }
    }

    /// Loads and validates the credentials for `account_id`.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::InvalidInput`] for a blank identifier,
    /// [`QuotaError::NotFound`] when no record exists, or the conversion
    /// error when the record is incomplete or of an unsupported type.
    pub fn credentials(&self, account_id: &str) -> Result<ProviderCredentials, QuotaError> {
        let id = account_id.trim();
        if id.is_empty() {
            return Err(QuotaError::InvalidInput("account id is empty".to_string()));
        }

        let record = self
            .store
            .get_by_id(id)
            .ok_or_else(|| QuotaError::NotFound(id.to_string()))?;

        Ok(ProviderCredentials::try_from(&record)?)
    }

    /// Fetches the usage snapshot for one account.
    ///
    /// The adapter runs under a child of `ctx`, so cancelling `ctx` aborts
    /// any outstanding call and every call shares one timeout budget.
    /// Snapshots with negative, non-finite or out-of-range figures are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns any [`QuotaError`] except `DiscoveryFailed`, which adapters
    /// only log.
    #[instrument(skip(self, ctx))]
    pub async fn resolve_usage(
        &self,
        ctx: &FetchContext,
        account_id: &str,
    ) -> Result<UsageSnapshot, QuotaError> {
        let credentials = self.credentials(account_id).inspect_err(|e| {
            warn!(kind = e.kind(), error = %e, "Cannot resolve credentials");
        })?;

        let kind = credentials.kind();
        debug!(provider = %kind.display_name(), "Dispatching to usage adapter");

        let scoped = ctx.child();
        self.adapter(kind)
            .fetch_usage(&scoped, &credentials)
            .await
            .and_then(|snapshot| {
                snapshot
                    .validate()
                    .map_err(|e| QuotaError::malformed("usage snapshot", e))?;
                Ok(snapshot)
            })
            .inspect_err(|e| warn!(kind = e.kind(), error = %e, "Usage fetch failed"))
    }
}

impl std::fmt::Debug for QuotaResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaResolver")
            .field("accounts", &self.store.ids().len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiro::TARGET_LIST_PROFILES;
    use crate::testing::{FakeTransport, StaticStore, amz_target, context};
    use modelgate_core::CredentialRecord;
    use modelgate_fetch::{FetchError, HttpResponse};
    use std::time::Duration;

    /// Adapter returning a fixed snapshot without any I/O.
    struct FixedAdapter(UsageSnapshot);

    #[async_trait::async_trait]
    impl UsageAdapter for FixedAdapter {
        fn provider(&self) -> ProviderKind {
            self.0.provider
        }

        async fn fetch_usage(
            &self,
            _ctx: &FetchContext,
            _credentials: &ProviderCredentials,
        ) -> Result<UsageSnapshot, QuotaError> {
            Ok(self.0.clone())
        }
    }

    fn resolver(records: Vec<CredentialRecord>) -> QuotaResolver {
        QuotaResolver::new(Arc::new(StaticStore(records)))
    }

    fn kiro_transport() -> Arc<FakeTransport> {
        FakeTransport::new(|request| match amz_target(request) {
            TARGET_LIST_PROFILES => Ok(HttpResponse::new(
                200,
                r#"{"profiles":[{"profileArn":"arn:aws:codewhisperer:us-east-1:1:profile/A"}]}"#,
            )),
            _ => Ok(HttpResponse::new(
                200,
                r#"{"subscriptionInfo":{"subscriptionTitle":"KIRO FREE"},
                    "usageBreakdownList":[{"currentUsageWithPrecision":12.5,"usageLimitWithPrecision":50.0}]}"#,
            )),
        })
    }

    #[tokio::test]
    async fn test_invalid_adapter_snapshot_is_rejected() {
        let transport = kiro_transport();
        let ctx = context(&transport);

        let mut snapshot = UsageSnapshot::new(ProviderKind::Copilot);
        snapshot.usage_limit = -1.0;
        let resolver = resolver(vec![
            CredentialRecord::new("copilot.json", "github-copilot").with("access_token", "t"),
        ])
        .with_adapter(Arc::new(FixedAdapter(snapshot)));

        let err = resolver.resolve_usage(&ctx, "copilot.json").await.unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_response");
        assert!(err.to_string().contains("usage_limit"));
    }

    #[tokio::test]
    async fn test_valid_adapter_snapshot_passes_through() {
        let transport = kiro_transport();
        let ctx = context(&transport);

        let mut snapshot = UsageSnapshot::new(ProviderKind::Copilot);
        snapshot.usage_limit = 300.0;
        snapshot.percent_remaining = Some(100.0);
        let resolver = resolver(vec![
            CredentialRecord::new("copilot.json", "github-copilot").with("access_token", "t"),
        ])
        .with_adapter(Arc::new(FixedAdapter(snapshot.clone())));

        let resolved = resolver.resolve_usage(&ctx, "copilot.json").await.unwrap();
        assert_eq!(resolved, snapshot);
    }

    #[tokio::test]
    async fn test_empty_id_makes_no_calls() {
        let transport = kiro_transport();
        let ctx = context(&transport);
        let resolver = resolver(vec![CredentialRecord::new("", "kiro").with("access_token", "abc")]);

        for id in ["", "   ", "\t\n"] {
            let err = resolver.resolve_usage(&ctx, id).await.unwrap_err();
            assert_eq!(err.kind(), "invalid_input");
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let transport = kiro_transport();
        let ctx = context(&transport);

        let err = resolver(Vec::new())
            .resolve_usage(&ctx, "kiro-1.json")
            .await
            .unwrap_err();
        assert!(matches!(err, QuotaError::NotFound(ref id) if id == "kiro-1.json"));
        assert!(err.requires_reauth());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_token() {
        let transport = kiro_transport();
        let ctx = context(&transport);
        let resolver = resolver(vec![
            CredentialRecord::new("kiro-1.json", "kiro").with("profile_arn", "arn-1"),
            CredentialRecord::new("kiro-2.json", "kiro").with("access_token", ""),
        ]);

        for id in ["kiro-1.json", "kiro-2.json"] {
            let err = resolver.resolve_usage(&ctx, id).await.unwrap_err();
            assert!(matches!(
                err,
                QuotaError::MissingCredentialField { field: "access_token", .. }
            ));
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_provider() {
        let transport = kiro_transport();
        let ctx = context(&transport);
        let resolver =
            resolver(vec![CredentialRecord::new("claude.json", "claude").with("access_token", "x")]);

        let err = resolver.resolve_usage(&ctx, "claude.json").await.unwrap_err();
        assert_eq!(err.kind(), "unsupported_provider");
    }

    #[tokio::test]
    async fn test_end_to_end_kiro_with_discovery() {
        let transport = kiro_transport();
        let ctx = context(&transport);
        let resolver = resolver(vec![
            CredentialRecord::new("kiro-1.json", "kiro")
                .with("access_token", "abc")
                .with("profile_arn", ""),
        ]);

        let snapshot = resolver.resolve_usage(&ctx, " kiro-1.json ").await.unwrap();
        assert_eq!(snapshot.provider, ProviderKind::Kiro);
        assert!((snapshot.current_usage - 12.5).abs() < f64::EPSILON);
        assert!((snapshot.usage_limit - 50.0).abs() < f64::EPSILON);

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].header_str("authorization"), Some("Bearer abc"));
        assert_eq!(
            calls[1].body_json().unwrap()["profileArn"],
            "arn:aws:codewhisperer:us-east-1:1:profile/A"
        );
    }

    #[tokio::test]
    async fn test_amazonq_uses_kiro_adapter() {
        let transport = kiro_transport();
        let ctx = context(&transport);
        let resolver = resolver(vec![
            CredentialRecord::new("q.json", "amazonq")
                .with("access_token", "abc")
                .with("profile_arn", "arn-q"),
        ]);

        resolver.resolve_usage(&ctx, "q.json").await.unwrap();
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].body_json().unwrap()["profileArn"], "arn-q");
    }

    #[tokio::test]
    async fn test_copilot_dispatch() {
        let transport = FakeTransport::new(|_| {
            Ok(HttpResponse::new(
                200,
                r#"{"copilot_plan":"individual","quota_snapshots":{"premium_interactions":
                    {"entitlement":300,"remaining":150,"percent_remaining":50.0}}}"#,
            ))
        });
        let ctx = context(&transport);
        let resolver = resolver(vec![
            CredentialRecord::new("gh.json", "github-copilot").with("access_token", "gho_x"),
        ]);

        let snapshot = resolver.resolve_usage(&ctx, "gh.json").await.unwrap();
        assert_eq!(snapshot.provider, ProviderKind::Copilot);
        assert_eq!(snapshot.remaining_percent(), Some(50.0));
        assert_eq!(transport.calls()[0].header_str("authorization"), Some("token gho_x"));
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_unavailable() {
        let transport = FakeTransport::new(|_| Err(FetchError::Transport("dns".into())));
        let ctx = context(&transport);
        let resolver = resolver(vec![
            CredentialRecord::new("gh.json", "github-copilot").with("access_token", "gho_x"),
        ]);

        let err = resolver.resolve_usage(&ctx, "gh.json").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_cancelled_caller_aborts_resolution() {
        let transport = kiro_transport();
        let ctx = context(&transport);
        ctx.cancellation_token().cancel();
        let resolver = resolver(vec![
            CredentialRecord::new("kiro-1.json", "kiro")
                .with("access_token", "abc")
                .with("profile_arn", "arn-1"),
        ]);

        let err = resolver.resolve_usage(&ctx, "kiro-1.json").await.unwrap_err();
        assert!(matches!(err, QuotaError::UpstreamUnavailable(FetchError::Cancelled)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_budget_times_out() {
        let transport = kiro_transport();
        let ctx = modelgate_fetch::FetchContext::builder()
            .http(Arc::clone(&transport) as Arc<dyn modelgate_fetch::HttpTransport>)
            .timeout(Duration::ZERO)
            .build()
            .unwrap();
        let resolver = resolver(vec![
            CredentialRecord::new("kiro-1.json", "kiro")
                .with("access_token", "abc")
                .with("profile_arn", "arn-1"),
        ]);

        let err = resolver.resolve_usage(&ctx, "kiro-1.json").await.unwrap_err();
        assert!(matches!(err, QuotaError::UpstreamUnavailable(FetchError::Timeout(_))));
    }
}
