//! Kiro usage response parser.

use chrono::{DateTime, Utc};
use modelgate_core::{ProviderKind, QuotaCategory, QuotaCategoryKind, UsageSnapshot};
use serde::Deserialize;
use tracing::debug;

use crate::error::QuotaError;

// ============================================================================
// JSON Response Structs
// ============================================================================

/// `GetUsageLimits` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KiroUsageLimits {
    /// Subscription details.
    #[serde(default)]
    pub subscription_info: SubscriptionInfo,

    /// Usage per resource category.
    #[serde(default)]
    pub usage_breakdown_list: Vec<UsageBreakdown>,

    /// Next reset time, in epoch seconds.
    #[serde(default)]
    pub next_date_reset: f64,
}

/// Subscription details.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInfo {
    /// Plan title (e.g. "KIRO FREE").
    #[serde(default)]
    pub subscription_title: String,
}

/// Usage for one resource category.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageBreakdown {
    /// Amount used.
    #[serde(default)]
    pub current_usage_with_precision: f64,

    /// Amount allotted.
    #[serde(default)]
    pub usage_limit_with_precision: f64,
}

impl KiroUsageLimits {
    /// Returns the reset time when the provider reported one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.next_date_reset;
        if !secs.is_finite() || secs <= 0.0 {
            return None;
        }
        let nanos = (secs.fract() * 1e9) as u32;
        DateTime::from_timestamp(secs.trunc() as i64, nanos)
    }

    /// Converts to a normalized snapshot.
    ///
    /// Only the first breakdown entry is surfaced. Without any entry the
    /// usage figures stay at zero.
    pub fn to_snapshot(&self) -> UsageSnapshot {
        let mut snapshot = UsageSnapshot::new(ProviderKind::Kiro);
        snapshot.plan_label.clone_from(&self.subscription_info.subscription_title);
        snapshot.reset_at = self.reset_at();

        if self.usage_breakdown_list.len() > 1 {
            debug!(
                entries = self.usage_breakdown_list.len(),
                "Surfacing first usage breakdown entry only"
            );
        }

        if let Some(first) = self.usage_breakdown_list.first() {
            snapshot.current_usage = first.current_usage_with_precision;
            snapshot.usage_limit = first.usage_limit_with_precision;

            let remaining =
                (first.usage_limit_with_precision - first.current_usage_with_precision).max(0.0);
            snapshot.set_category(QuotaCategory::new(
                QuotaCategoryKind::Credits,
                first.usage_limit_with_precision,
                remaining,
            ));
        }

        snapshot.sanitize();
        snapshot
    }
}

/// Parses a `GetUsageLimits` body.
///
/// # Errors
///
/// Returns [`QuotaError::MalformedUpstreamResponse`] if the body is not the
/// expected JSON object.
pub fn parse_usage_limits(body: &str) -> Result<KiroUsageLimits, QuotaError> {
    serde_json::from_str(body).map_err(|e| QuotaError::malformed("usage", e))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "subscriptionInfo": { "subscriptionTitle": "KIRO PRO" },
            "usageBreakdownList": [
                { "currentUsageWithPrecision": 12.5, "usageLimitWithPrecision": 50.0 },
                { "currentUsageWithPrecision": 99.0, "usageLimitWithPrecision": 100.0 }
            ],
            "nextDateReset": 1767225600.0
        }"#;

        let snapshot = parse_usage_limits(json).unwrap().to_snapshot();
        assert_eq!(snapshot.provider, ProviderKind::Kiro);
        assert_eq!(snapshot.plan_label, "KIRO PRO");
        assert!((snapshot.current_usage - 12.5).abs() < f64::EPSILON);
        assert!((snapshot.usage_limit - 50.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.percent_remaining, None);
        assert_eq!(snapshot.reset_at.unwrap().timestamp(), 1_767_225_600);

        let credits = snapshot.category(QuotaCategoryKind::Credits).unwrap();
        assert!((credits.remaining - 37.5).abs() < f64::EPSILON);
        assert_eq!(snapshot.categories.len(), 1);
    }

    #[test]
    fn test_missing_breakdown_defaults_to_zero() {
        let json = r#"{ "subscriptionInfo": { "subscriptionTitle": "KIRO FREE" } }"#;
        let snapshot = parse_usage_limits(json).unwrap().to_snapshot();

        assert_eq!(snapshot.plan_label, "KIRO FREE");
        assert!(snapshot.current_usage.abs() < f64::EPSILON);
        assert!(snapshot.usage_limit.abs() < f64::EPSILON);
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.reset_at.is_none());
    }

    #[test]
    fn test_empty_object() {
        let snapshot = parse_usage_limits("{}").unwrap().to_snapshot();
        assert!(snapshot.plan_label.is_empty());
        assert!(!snapshot.has_data());
    }

    #[test]
    fn test_fractional_reset() {
        let limits = KiroUsageLimits {
            next_date_reset: 1_767_225_600.5,
            ..Default::default()
        };
        let reset = limits.reset_at().unwrap();
        assert_eq!(reset.timestamp(), 1_767_225_600);
        assert_eq!(reset.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_malformed_body() {
        let err = parse_usage_limits("<html>gateway timeout</html>").unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_response");

        let err = parse_usage_limits(r#"{ "usageBreakdownList": "nope" }"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_response");
    }
}
