//! Kiro API client.

use modelgate_fetch::{FetchContext, HttpRequest};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderName};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::parser::{self, KiroUsageLimits};
use crate::error::QuotaError;

// ============================================================================
// Constants
// ============================================================================

/// CodeWhisperer service endpoint.
pub const KIRO_ENDPOINT: &str = "https://codewhisperer.us-east-1.amazonaws.com";

/// Operation listing the account's profiles.
pub const TARGET_LIST_PROFILES: &str = "AmazonCodeWhispererService.ListProfiles";

/// Operation returning usage limits.
pub const TARGET_GET_USAGE: &str = "AmazonCodeWhispererService.GetUsageLimits";

const AMZ_JSON: &str = "application/x-amz-json-1.0";
const ORIGIN: &str = "AI_EDITOR";
const RESOURCE_TYPE: &str = "AGENTIC_REQUEST";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UsageLimitsRequest<'a> {
    origin: &'static str,
    resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_arn: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ListProfilesRequest {}

#[derive(Debug, Deserialize)]
struct ListProfilesResponse {
    #[serde(default)]
    profiles: Vec<Profile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    #[serde(default)]
    profile_arn: String,
}

// ============================================================================
// API Client
// ============================================================================

/// Kiro API client.
#[derive(Debug, Clone)]
pub struct KiroApiClient {
    endpoint: String,
}

impl Default for KiroApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl KiroApiClient {
    /// Creates a client for the production endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(KIRO_ENDPOINT)
    }

    /// Creates a client for a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request<T: Serialize>(
        &self,
        target: &str,
        token: &str,
        body: &T,
    ) -> Result<HttpRequest, QuotaError> {
        Ok(HttpRequest::post(&self.endpoint)
            .header(CONTENT_TYPE, AMZ_JSON)?
            .header(HeaderName::from_static("x-amz-target"), target)?
            .authorization(&format!("Bearer {token}"))?
            .header(ACCEPT, "application/json")?
            .json(body)?)
    }

    /// Lists the profile ARNs visible to `token`, in response order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-200 status, or an
    /// unparsable body.
    #[instrument(skip(self, ctx, token))]
    pub async fn list_profiles(
        &self,
        ctx: &FetchContext,
        token: &str,
    ) -> Result<Vec<String>, QuotaError> {
        debug!("Listing Kiro profiles");

        let request = self.request(TARGET_LIST_PROFILES, token, &ListProfilesRequest {})?;
        let response = ctx.send(request).await?.error_for_status()?;
        let parsed: ListProfilesResponse = serde_json::from_str(&response.body)
            .map_err(|e| QuotaError::malformed("profiles", e))?;

        Ok(parsed.profiles.into_iter().map(|p| p.profile_arn).collect())
    }

    /// Fetches usage limits, scoped to `profile_arn` when given.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-200 status, or an
    /// unparsable body.
    #[instrument(skip(self, ctx, token))]
    pub async fn get_usage_limits(
        &self,
        ctx: &FetchContext,
        token: &str,
        profile_arn: Option<&str>,
    ) -> Result<KiroUsageLimits, QuotaError> {
        debug!("Fetching Kiro usage limits");

        let body = UsageLimitsRequest {
            origin: ORIGIN,
            resource_type: RESOURCE_TYPE,
            profile_arn,
        };
        let request = self.request(TARGET_GET_USAGE, token, &body)?;
        let response = ctx.send(request).await?.error_for_status()?;

        parser::parse_usage_limits(&response.body)
    }
}

// ============================================================================
// Tests
// ============================================================================
