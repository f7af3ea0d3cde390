//! The usage adapter seam.

use async_trait::async_trait;
use modelgate_core::{ProviderCredentials, ProviderKind, UsageSnapshot};
use modelgate_fetch::FetchContext;

use crate::error::QuotaError;

/// Fetches one provider family's native usage data and normalizes it.
///
/// Implementations own their provider's wire format. They never retry, and
/// every outbound call goes through [`FetchContext::send`] so the caller's
/// deadline and cancellation apply.
#[async_trait]
pub trait UsageAdapter: Send + Sync {
    /// Provider family this adapter serves.
    fn provider(&self) -> ProviderKind;

    /// Fetches usage for one account.
    async fn fetch_usage(
        &self,
        ctx: &FetchContext,
        credentials: &ProviderCredentials,
    ) -> Result<UsageSnapshot, QuotaError>;
}

/// Error for credentials handed to the wrong adapter.
pub(crate) fn mismatched(adapter: ProviderKind, credentials: &ProviderCredentials) -> QuotaError {
    QuotaError::InvalidInput(format!(
        "{} adapter cannot use {} credentials",
        adapter.display_name(),
        credentials.kind().display_name()
    ))
}
