//! Usage-related types.
//!
//! This module contains the normalized quota types:
//! - [`UsageSnapshot`] - One provider account's quota state
//! - [`QuotaCategory`] - Per-category quota detail
//! - [`QuotaCategoryKind`] - Which category a detail describes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::provider::ProviderKind;
use crate::error::CoreError;

// ============================================================================
// Quota Categories
// ============================================================================

/// Kind of quota a category entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaCategoryKind {
    /// Chat interactions.
    Chat,
    /// Inline code completions.
    Completions,
    /// Premium model interactions.
    PremiumInteractions,
    /// Generic credit pool.
    Credits,
}

impl QuotaCategoryKind {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Completions => "completions",
            Self::PremiumInteractions => "premium_interactions",
            Self::Credits => "credits",
        }
    }

    /// Returns a human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Completions => "Completions",
            Self::PremiumInteractions => "Premium Interactions",
            Self::Credits => "Credits",
        }
    }
}

impl fmt::Display for QuotaCategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quota detail for one category, in provider-defined units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaCategory {
    /// Category kind.
    pub kind: QuotaCategoryKind,
    /// Amount allotted for the window.
    pub entitlement: f64,
    /// Amount still available.
    pub remaining: f64,
    /// Provider-reported remaining percentage, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_remaining: Option<f64>,
    /// Whether the category has no cap.
    #[serde(default)]
    pub unlimited: bool,
    /// Usage beyond the entitlement.
    #[serde(default)]
    pub overage_count: f64,
    /// Whether usage beyond the entitlement is permitted.
    #[serde(default)]
    pub overage_permitted: bool,
    /// Provider's own identifier for this quota.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_id: Option<String>,
}

impl QuotaCategory {
    /// Creates a category from entitlement and remaining amounts.
    pub fn new(kind: QuotaCategoryKind, entitlement: f64, remaining: f64) -> Self {
        Self {
            kind,
            entitlement,
            remaining,
            percent_remaining: None,
            unlimited: false,
            overage_count: 0.0,
            overage_permitted: false,
            quota_id: None,
        }
    }

    /// Returns the amount consumed, never negative.
    pub fn used(&self) -> f64 {
        (self.entitlement - self.remaining).max(0.0)
    }
}

// ============================================================================
// Usage Snapshot
// ============================================================================

/// Normalized quota usage for one provider account.
///
/// Units of `current_usage` and `usage_limit` are provider-specific (credits,
/// request counts) and are not comparable across providers. Snapshots are
/// built fresh per request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Provider family that produced the snapshot.
    pub provider: ProviderKind,
    /// Subscription tier label.
    pub plan_label: String,
    /// Amount consumed in the current window.
    pub current_usage: f64,
    /// Amount allotted for the current window.
    pub usage_limit: f64,
    /// Provider-reported remaining percentage (0-100), if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_remaining: Option<f64>,
    /// When the quota window rolls over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
    /// Per-category details, at most one entry per kind.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<QuotaCategory>,
    /// When this snapshot was built.
    pub fetched_at: DateTime<Utc>,
}

impl UsageSnapshot {
    /// Creates an empty snapshot for a provider.
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            plan_label: String::new(),
            current_usage: 0.0,
            usage_limit: 0.0,
            percent_remaining: None,
            reset_at: None,
            categories: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Returns the category of the given kind, if present.
    pub fn category(&self, kind: QuotaCategoryKind) -> Option<&QuotaCategory> {
        self.categories.iter().find(|c| c.kind == kind)
    }

    /// Inserts or replaces the category of the same kind.
    pub fn set_category(&mut self, category: QuotaCategory) {
        if let Some(existing) = self.categories.iter_mut().find(|c| c.kind == category.kind) {
            *existing = category;
        } else {
            self.categories.push(category);
        }
    }

    /// Returns the remaining percentage.
    ///
    /// Prefers the provider-reported value; otherwise derives it from
    /// `current_usage / usage_limit`. Returns `None` when neither is possible.
    pub fn remaining_percent(&self) -> Option<f64> {
        if let Some(percent) = self.percent_remaining {
            return Some(percent);
        }
        if self.usage_limit > 0.0 {
            let used = (self.current_usage / self.usage_limit) * 100.0;
            return Some((100.0 - used).clamp(0.0, 100.0));
        }
        None
    }

    /// Returns true if any quota information is present.
    pub fn has_data(&self) -> bool {
        self.usage_limit > 0.0 || self.current_usage > 0.0 || !self.categories.is_empty()
    }

    /// Validates the snapshot data.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if a quantity is negative or not
    /// finite, or a reported percentage is outside [0, 100].
    pub fn validate(&self) -> Result<(), CoreError> {
        check_quantity("current_usage", self.current_usage)?;
        check_quantity("usage_limit", self.usage_limit)?;
        if let Some(percent) = self.percent_remaining {
            check_percent("percent_remaining", percent)?;
        }
        for category in &self.categories {
            check_quantity(category.kind.as_str(), category.entitlement)
                .and_then(|()| {
                    category
                        .percent_remaining
                        .map_or(Ok(()), |p| check_percent(category.kind.as_str(), p))
                })
                .map_err(|e| CoreError::InvalidData(format!("category: {e}")))?;
        }
        Ok(())
    }

    /// Clamps quantities and percentages into valid ranges.
    ///
    /// Unlike `validate()`, this fixes values instead of rejecting them.
    pub fn sanitize(&mut self) {
        self.current_usage = sanitize_quantity(self.current_usage);
        self.usage_limit = sanitize_quantity(self.usage_limit);
        self.percent_remaining = self.percent_remaining.map(sanitize_percent);
        for category in &mut self.categories {
            category.entitlement = sanitize_quantity(category.entitlement);
            category.remaining = sanitize_quantity(category.remaining);
            category.percent_remaining = category.percent_remaining.map(sanitize_percent);
        }
    }
}

fn check_quantity(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidData(format!("{field} is not a finite number")));
    }
    if value < 0.0 {
        return Err(CoreError::InvalidData(format!("{field} {value} is negative")));
    }
    Ok(())
}

fn check_percent(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(CoreError::InvalidData(format!(
            "{field} {value} out of valid range [0, 100]"
        )));
    }
    Ok(())
}

fn sanitize_quantity(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn sanitize_percent(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 }
}

// ============================================================================
// Tests
// ============================================================================
