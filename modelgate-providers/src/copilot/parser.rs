//! Copilot response parser.

use chrono::{DateTime, NaiveDate, Utc};
use modelgate_core::{ProviderKind, QuotaCategory, QuotaCategoryKind, UsageSnapshot};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::QuotaError;

// ============================================================================
// JSON Response Structs
// ============================================================================

/// Response from `/copilot_internal/user`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CopilotUsageResponse {
    /// Access SKU (e.g. "free_limited_copilot").
    #[serde(default)]
    pub access_type_sku: String,

    /// Whether Copilot Chat is enabled.
    #[serde(default)]
    pub chat_enabled: bool,

    /// Plan name (e.g. "individual").
    #[serde(default)]
    pub copilot_plan: String,

    /// Quota reset date, `YYYY-MM-DD` or RFC 3339.
    #[serde(default)]
    pub quota_reset_date: String,

    /// Date the seat was assigned.
    #[serde(default)]
    pub assigned_date: Option<String>,

    /// Per-category quota.
    #[serde(default)]
    pub quota_snapshots: QuotaSnapshots,
}

/// Quota snapshots keyed by category.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QuotaSnapshots {
    /// Chat messages.
    #[serde(default)]
    pub chat: Option<QuotaDetail>,

    /// Inline completions.
    #[serde(default)]
    pub completions: Option<QuotaDetail>,

    /// Premium model requests.
    #[serde(default)]
    pub premium_interactions: Option<QuotaDetail>,
}

/// Quota for one category.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct QuotaDetail {
    /// Amount allotted.
    pub entitlement: f64,
    /// Usage beyond the entitlement.
    pub overage_count: f64,
    /// Whether overage is allowed.
    pub overage_permitted: bool,
    /// Remaining percentage as reported.
    pub percent_remaining: f64,
    /// Provider quota identifier.
    pub quota_id: String,
    /// Remaining quota as reported alongside `remaining`.
    pub quota_remaining: f64,
    /// Amount still available.
    pub remaining: f64,
    /// Whether the category has no cap.
    pub unlimited: bool,
}

impl QuotaDetail {
    fn to_category(&self, kind: QuotaCategoryKind) -> QuotaCategory {
        let mut category = QuotaCategory::new(kind, self.entitlement, self.remaining);
        category.percent_remaining = Some(self.percent_remaining);
        category.unlimited = self.unlimited;
        category.overage_count = self.overage_count;
        category.overage_permitted = self.overage_permitted;
        if !self.quota_id.is_empty() {
            category.quota_id = Some(self.quota_id.clone());
        }
        category
    }
}

impl CopilotUsageResponse {
    /// Returns the plan label, preferring `copilot_plan` over the SKU.
    pub fn plan_label(&self) -> &str {
        if self.copilot_plan.is_empty() {
            &self.access_type_sku
        } else {
            &self.copilot_plan
        }
    }

    /// Parses `quota_reset_date`.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.quota_reset_date.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                warn!(value = raw, error = %e, "Unrecognized quota reset date");
                None
            }
        }
    }

    /// Converts to a normalized snapshot.
    ///
    /// Every category is kept; the headline figures come from premium
    /// interactions.
    pub fn to_snapshot(&self) -> UsageSnapshot {
        let mut snapshot = UsageSnapshot::new(ProviderKind::Copilot);
        snapshot.plan_label = self.plan_label().to_string();
        snapshot.reset_at = self.reset_at();

        let quotas = &self.quota_snapshots;
        let entries = [
            (QuotaCategoryKind::Chat, quotas.chat.as_ref()),
            (QuotaCategoryKind::Completions, quotas.completions.as_ref()),
            (
                QuotaCategoryKind::PremiumInteractions,
                quotas.premium_interactions.as_ref(),
            ),
        ];
        for (kind, detail) in entries {
            if let Some(detail) = detail {
                snapshot.set_category(detail.to_category(kind));
            }
        }

        if let Some(premium) = &quotas.premium_interactions {
            snapshot.usage_limit = premium.entitlement;
            snapshot.current_usage = (premium.entitlement - premium.remaining).max(0.0);
            snapshot.percent_remaining = Some(premium.percent_remaining);
        } else {
            debug!("No premium interactions quota in response");
        }

        snapshot.sanitize();
        snapshot
    }
}

/// Parses a `/copilot_internal/user` body.
///
/// # Errors
///
/// Returns [`QuotaError::MalformedUpstreamResponse`] if the body is not the
/// expected JSON object.
pub fn parse_usage_response(body: &str) -> Result<CopilotUsageResponse, QuotaError> {
    debug!(len = body.len(), "Parsing Copilot response");
    serde_json::from_str(body).map_err(|e| QuotaError::malformed("copilot user", e))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "access_type_sku": "free_limited_copilot",
        "analytics_tracking_id": "ignored",
        "assigned_date": "2025-01-10T12:00:00Z",
        "chat_enabled": true,
        "copilot_plan": "individual",
        "quota_reset_date": "2025-07-01",
        "quota_snapshots": {
            "chat": {
                "entitlement": 50, "overage_count": 0, "overage_permitted": false,
                "percent_remaining": 80.0, "quota_id": "chat", "quota_remaining": 40,
                "remaining": 40, "unlimited": false
            },
            "completions": {
                "entitlement": 0, "overage_count": 0, "overage_permitted": false,
                "percent_remaining": 100.0, "quota_id": "completions",
                "quota_remaining": 0, "remaining": 0, "unlimited": true
            },
            "premium_interactions": {
                "entitlement": 300, "overage_count": 2, "overage_permitted": true,
                "percent_remaining": 25.0, "quota_id": "premium_interactions",
                "quota_remaining": 75, "remaining": 75, "unlimited": false
            }
        }
    }"#;

    #[test]
    fn test_parse_full_response() {
        let response = parse_usage_response(FULL).unwrap();
        assert!(response.chat_enabled);
        assert_eq!(response.assigned_date.as_deref(), Some("2025-01-10T12:00:00Z"));

        let snapshot = response.to_snapshot();
        assert_eq!(snapshot.provider, ProviderKind::Copilot);
        assert_eq!(snapshot.plan_label, "individual");
        assert!((snapshot.usage_limit - 300.0).abs() < f64::EPSILON);
        assert!((snapshot.current_usage - 225.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.percent_remaining, Some(25.0));
        assert_eq!(snapshot.categories.len(), 3);

        let completions = snapshot.category(QuotaCategoryKind::Completions).unwrap();
        assert!(completions.unlimited);

        let premium = snapshot
            .category(QuotaCategoryKind::PremiumInteractions)
            .unwrap();
        assert!(premium.overage_permitted);
        assert!((premium.overage_count - 2.0).abs() < f64::EPSILON);
        assert_eq!(premium.quota_id.as_deref(), Some("premium_interactions"));
    }

    #[test]
    fn test_reset_date_formats() {
        let mut response = CopilotUsageResponse {
            quota_reset_date: "2025-07-01".to_string(),
            ..Default::default()
        };
        assert_eq!(
            response.reset_at().unwrap().to_rfc3339(),
            "2025-07-01T00:00:00+00:00"
        );

        response.quota_reset_date = "2025-07-01T08:30:00+02:00".to_string();
        assert_eq!(
            response.reset_at().unwrap().to_rfc3339(),
            "2025-07-01T06:30:00+00:00"
        );

        response.quota_reset_date = "next month".to_string();
        assert!(response.reset_at().is_none());

        response.quota_reset_date = String::new();
        assert!(response.reset_at().is_none());
    }

    #[test]
    fn test_plan_falls_back_to_sku() {
        let response = parse_usage_response(r#"{"access_type_sku":"free_limited_copilot"}"#)
            .unwrap();
        assert_eq!(response.plan_label(), "free_limited_copilot");
    }

    #[test]
    fn test_missing_snapshots() {
        let snapshot = parse_usage_response("{}").unwrap().to_snapshot();
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.percent_remaining.is_none());
        assert!(!snapshot.has_data());
    }

    #[test]
    fn test_overdrawn_premium_clamps_usage() {
        let json = r#"{"quota_snapshots":{"premium_interactions":
            {"entitlement": 50, "remaining": 60, "percent_remaining": 100.0}}}"#;
        let snapshot = parse_usage_response(json).unwrap().to_snapshot();
        assert!(snapshot.current_usage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed() {
        let err = parse_usage_response("not json").unwrap_err();
        assert!(matches!(err, QuotaError::MalformedUpstreamResponse { .. }));

        let err = parse_usage_response(r#"{"quota_snapshots": "none"}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_response");
    }
}
