//! Kiro (AWS CodeWhisperer) usage adapter.
//!
//! Usage limits are scoped to a profile ARN. Credentials imported from the
//! IDE usually carry one; when they don't, the adapter lists the account's
//! profiles first and uses the first ARN returned.
//!
//! ## API Endpoints
//!
//! Both calls `POST` to the same endpoint and select the operation with
//! `x-amz-target`:
//!
//! - `AmazonCodeWhispererService.ListProfiles`
//! - `AmazonCodeWhispererService.GetUsageLimits`

mod api;
mod fetcher;
pub(crate) mod parser;

pub use api::{KIRO_ENDPOINT, KiroApiClient, TARGET_GET_USAGE, TARGET_LIST_PROFILES};
pub use fetcher::KiroUsageAdapter;
pub use parser::{KiroUsageLimits, SubscriptionInfo, UsageBreakdown};
