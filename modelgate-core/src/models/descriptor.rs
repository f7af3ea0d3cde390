//! Model capability descriptors.
//!
//! This module contains the static capability metadata the registry serves:
//! - [`ModelDescriptor`] - One model as served by one channel
//! - [`ReasoningSupport`] - Extended-reasoning capability (budget or levels)
//! - [`EffortLevel`] - Named reasoning effort level

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Reasoning Support
// ============================================================================

/// Named reasoning effort level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    /// Minimal reasoning.
    Minimal,
    /// Low effort.
    Low,
    /// Medium effort.
    Medium,
    /// High effort.
    High,
}

impl EffortLevel {
    /// The standard four-level ladder.
    pub const STANDARD: [EffortLevel; 4] = [Self::Minimal, Self::Low, Self::Medium, Self::High];

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extended-reasoning capability of a model.
///
/// A model expresses reasoning either as a numeric token budget or as a set
/// of discrete effort levels, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReasoningSupport {
    /// Numeric thinking-token budget.
    Budget {
        /// Smallest accepted budget.
        min: u32,
        /// Largest accepted budget.
        max: u32,
        /// Whether a zero budget (reasoning disabled) is accepted.
        zero_allowed: bool,
        /// Whether the provider may pick the budget dynamically.
        dynamic_allowed: bool,
    },
    /// Discrete named effort levels.
    Levels {
        /// Accepted levels, lowest first.
        levels: Vec<EffortLevel>,
    },
}

impl ReasoningSupport {
    /// Budget shape with both zero and dynamic budgets rejected.
    pub fn budget(min: u32, max: u32) -> Self {
        Self::Budget {
            min,
            max,
            zero_allowed: false,
            dynamic_allowed: false,
        }
    }

    /// Budget shape with explicit zero/dynamic flags.
    pub fn budget_with(min: u32, max: u32, zero_allowed: bool, dynamic_allowed: bool) -> Self {
        Self::Budget {
            min,
            max,
            zero_allowed,
            dynamic_allowed,
        }
    }

    /// The standard minimal/low/medium/high level shape.
    pub fn standard_levels() -> Self {
        Self::Levels {
            levels: EffortLevel::STANDARD.to_vec(),
        }
    }

    /// Returns true if a requested thinking budget is acceptable.
    ///
    /// Level-shaped models do not accept numeric budgets.
    pub fn accepts_budget(&self, budget: u32) -> bool {
        match self {
            Self::Budget {
                min,
                max,
                zero_allowed,
                ..
            } => (budget == 0 && *zero_allowed) || (budget >= *min && budget <= *max),
            Self::Levels { .. } => false,
        }
    }

    /// Returns true if the given effort level is accepted.
    pub fn accepts_level(&self, level: EffortLevel) -> bool {
        match self {
            Self::Levels { levels } => levels.contains(&level),
            Self::Budget { .. } => false,
        }
    }
}

// ============================================================================
// Model Descriptor
// ============================================================================

/// Capability metadata for one model as served by one channel.
///
/// Descriptors are built once when a table is first accessed and are never
/// mutated afterwards. `id` is unique within its channel only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Context window in tokens; `None` means unspecified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u32>,
    /// Output cap in tokens; `None` means unspecified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    /// Endpoint paths the model accepts (empty for e.g. embedding models).
    #[serde(default)]
    pub supported_endpoints: Vec<String>,
    /// Extended-reasoning capability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningSupport>,
    /// Provider that owns the model (e.g. "anthropic", "github-copilot").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owned_by: String,
    /// Executor family the model routes through.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub channel_tag: String,
    /// Creation timestamp (unix seconds), informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl ModelDescriptor {
    /// Creates a descriptor with only an identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: String::new(),
            context_length: None,
            max_completion_tokens: None,
            supported_endpoints: Vec::new(),
            reasoning: None,
            owned_by: String::new(),
            channel_tag: String::new(),
            created: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the context window. Zero is stored as unspecified.
    #[must_use]
    pub fn context_length(mut self, tokens: u32) -> Self {
        self.context_length = (tokens > 0).then_some(tokens);
        self
    }

    /// Sets the output cap. Zero is stored as unspecified.
    #[must_use]
    pub fn max_completion_tokens(mut self, tokens: u32) -> Self {
        self.max_completion_tokens = (tokens > 0).then_some(tokens);
        self
    }

    /// Sets the supported endpoint paths.
    #[must_use]
    pub fn endpoints(mut self, endpoints: &[&str]) -> Self {
        self.supported_endpoints = endpoints.iter().map(|e| (*e).to_string()).collect();
        self
    }

    /// Sets the reasoning capability.
    #[must_use]
    pub fn reasoning(mut self, reasoning: ReasoningSupport) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    /// Sets owner and executor family tags.
    #[must_use]
    pub fn owned(mut self, owned_by: impl Into<String>, channel_tag: impl Into<String>) -> Self {
        self.owned_by = owned_by.into();
        self.channel_tag = channel_tag.into();
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn created(mut self, unix_secs: i64) -> Self {
        self.created = Some(unix_secs);
        self
    }

    /// Returns true if the model accepts the given endpoint path.
    pub fn supports_endpoint(&self, endpoint: &str) -> bool {
        self.supported_endpoints.iter().any(|e| e == endpoint)
    }

    /// Returns the display name, falling back to the id.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
