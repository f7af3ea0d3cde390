//! Copilot API client.

use modelgate_fetch::{FetchContext, HttpRequest};
use reqwest::header::{ACCEPT, HeaderName, USER_AGENT};
use tracing::{debug, instrument};

use super::parser::{self, CopilotUsageResponse};
use crate::error::QuotaError;

// ============================================================================
// Constants
// ============================================================================

/// GitHub API base URL.
pub const COPILOT_API_BASE: &str = "https://api.github.com";

/// Copilot user endpoint.
pub const USER_ENDPOINT: &str = "/copilot_internal/user";

const USER_AGENT_VALUE: &str = "GitHubCopilotChat/0.26.7";
const EDITOR_VERSION: &str = "vscode/1.100.0";
const EDITOR_PLUGIN_VERSION: &str = "copilot-chat/0.26.7";
const GITHUB_API_VERSION: &str = "2025-04-01";

// ============================================================================
// API Client
// ============================================================================

/// Copilot API client.
#[derive(Debug, Clone)]
pub struct CopilotApiClient {
    base_url: String,
}

impl Default for CopilotApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CopilotApiClient {
    /// Creates a client for api.github.com.
    pub fn new() -> Self {
        Self::with_base_url(COPILOT_API_BASE)
    }

    /// Creates a client for a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the full user endpoint URL.
    pub fn user_url(&self) -> String {
        format!("{}{}", self.base_url, USER_ENDPOINT)
    }

    fn request(&self, token: &str) -> Result<HttpRequest, QuotaError> {
        Ok(HttpRequest::get(self.user_url())
            .authorization(&format!("token {token}"))?
            .header(ACCEPT, "application/json")?
            .header(USER_AGENT, USER_AGENT_VALUE)?
            .header(HeaderName::from_static("editor-version"), EDITOR_VERSION)?
            .header(
                HeaderName::from_static("editor-plugin-version"),
                EDITOR_PLUGIN_VERSION,
            )?
            .header(
                HeaderName::from_static("x-github-api-version"),
                GITHUB_API_VERSION,
            )?)
    }

    /// Fetches the user's quota snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::UpstreamRejected`] for any status other than
    /// 200, [`QuotaError::MalformedUpstreamResponse`] for an unparsable
    /// body, or [`QuotaError::UpstreamUnavailable`] on transport failure.
    #[instrument(skip(self, ctx, token))]
    pub async fn fetch_user_quota(
        &self,
        ctx: &FetchContext,
        token: &str,
    ) -> Result<CopilotUsageResponse, QuotaError> {
        debug!("Fetching Copilot quota");

        let response = ctx.send(self.request(token)?).await?.error_for_status()?;
        parser::parse_usage_response(&response.body)
    }
}

// ============================================================================
// Tests
// ============================================================================
