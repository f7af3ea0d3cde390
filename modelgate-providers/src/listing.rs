//! Conversion of a saved Copilot `/models` listing into descriptors.
//!
//! This is how the GitHub Copilot table is maintained: a listing captured
//! from the live endpoint is converted offline, and the result is reviewed
//! and pasted into [`crate::catalog::copilot`]. Nothing here touches the
//! network.

use std::collections::HashSet;

use modelgate_core::{ListingDefaults, ModelDescriptor, ReasoningSupport};
use serde::Deserialize;
use tracing::debug;

const OWNER: &str = "github-copilot";

// ============================================================================
// Listing Wire Types
// ============================================================================

/// A `/models` response, either wrapped in `data` or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing {
    Wrapped { data: Vec<ListedModel> },
    Bare(Vec<ListedModel>),
}

/// One model entry from the listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListedModel {
    /// Model id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Vendor name.
    pub vendor: String,
    /// Capability block.
    pub capabilities: ListedCapabilities,
    /// Endpoints the listing declares.
    pub supported_endpoints: Vec<String>,
}

/// Capability block of a listed model.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListedCapabilities {
    /// Model family.
    pub family: String,
    /// Token limits.
    pub limits: ListedLimits,
    /// Feature flags.
    pub supports: ListedSupports,
}

/// Token limits of a listed model.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListedLimits {
    /// Context window.
    pub max_context_window_tokens: u32,
    /// Output cap.
    pub max_output_tokens: u32,
}

/// Feature flags of a listed model.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListedSupports {
    /// Largest thinking budget; zero when budgets are unsupported.
    pub max_thinking_budget: u32,
    /// Smallest thinking budget.
    pub min_thinking_budget: u32,
}

// ============================================================================
// Conversion
// ============================================================================

/// Parses a saved listing and converts it.
///
/// # Errors
///
/// Returns an error if `json` is not a model listing.
pub fn descriptors_from_listing(
    json: &str,
    defaults: &ListingDefaults,
    created: i64,
) -> Result<Vec<ModelDescriptor>, serde_json::Error> {
    let models = match serde_json::from_str::<Listing>(json)? {
        Listing::Wrapped { data } | Listing::Bare(data) => data,
    };
    Ok(convert(models, defaults, created))
}

/// Converts listed models into sorted, de-duplicated descriptors.
///
/// Entries with an empty id are dropped; for repeated ids the first entry wins.
pub fn convert(
    mut models: Vec<ListedModel>,
    defaults: &ListingDefaults,
    created: i64,
) -> Vec<ModelDescriptor> {
    models.sort_by(|a, b| a.id.cmp(&b.id));

    let mut seen = HashSet::new();
    models
        .iter()
        .filter(|m| !m.id.is_empty())
        .filter(|m| {
            let fresh = seen.insert(m.id.clone());
            if !fresh {
                debug!(id = %m.id, "Skipping duplicate listing entry");
            }
            fresh
        })
        .map(|m| descriptor(m, defaults, created))
        .collect()
}

fn descriptor(model: &ListedModel, defaults: &ListingDefaults, created: i64) -> ModelDescriptor {
    let name = if model.name.is_empty() {
        model.id.as_str()
    } else {
        model.name.as_str()
    };
    let limits = &model.capabilities.limits;

    let mut descriptor = ModelDescriptor::new(&model.id)
        .display_name(name)
        .description(format!("{name} via GitHub Copilot"))
        .context_length(defaults.context_or_default(limits.max_context_window_tokens))
        .max_completion_tokens(defaults.output_or_default(limits.max_output_tokens))
        .owned(OWNER, OWNER)
        .created(created);
    descriptor.supported_endpoints = infer_endpoints(model);
    descriptor.reasoning = infer_reasoning(model);
    descriptor
}

/// Endpoints declared by the listing, or inferred from the id.
pub fn infer_endpoints(model: &ListedModel) -> Vec<String> {
    if !model.supported_endpoints.is_empty() {
        return model.supported_endpoints.clone();
    }

    let id = model.id.to_lowercase();
    if id.contains("embedding") {
        Vec::new()
    } else if id.contains("-codex") {
        vec!["/responses".to_string()]
    } else {
        vec!["/chat/completions".to_string()]
    }
}

/// Reasoning shape from the thinking budget, or effort levels for OpenAI ids.
pub fn infer_reasoning(model: &ListedModel) -> Option<ReasoningSupport> {
    let supports = &model.capabilities.supports;
    if supports.max_thinking_budget > 0 {
        return Some(ReasoningSupport::budget(
            supports.min_thinking_budget,
            supports.max_thinking_budget,
        ));
    }

    let id = model.id.to_lowercase();
    ["gpt-", "o1", "o3"]
        .iter()
        .any(|prefix| id.starts_with(prefix))
        .then(ReasoningSupport::standard_levels)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "object": "list",
        "data": [
            {
                "id": "gpt-5.1-codex",
                "name": "GPT-5.1-Codex",
                "vendor": "OpenAI",
                "capabilities": {
                    "family": "gpt-5.1-codex",
                    "limits": { "max_context_window_tokens": 400000, "max_output_tokens": 128000 }
                }
            },
            {
                "id": "claude-sonnet-4.5",
                "name": "Claude Sonnet 4.5",
                "capabilities": {
                    "limits": { "max_context_window_tokens": 144000, "max_output_tokens": 16000 },
                    "supports": { "max_thinking_budget": 32000, "min_thinking_budget": 1024 }
                },
                "supported_endpoints": ["/chat/completions"]
            },
            { "id": "text-embedding-3-small", "name": "Embedding V3 small" },
            { "id": "", "name": "nameless" },
            { "id": "o3-mini" },
            { "id": "claude-sonnet-4.5", "name": "duplicate" }
        ]
    }"#;

    fn converted() -> Vec<ModelDescriptor> {
        descriptors_from_listing(LISTING, &ListingDefaults::default(), 1_768_908_139).unwrap()
    }

    #[test]
    fn test_sorted_without_empty_or_duplicate_ids() {
        let ids: Vec<String> = converted().into_iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![
                "claude-sonnet-4.5",
                "gpt-5.1-codex",
                "o3-mini",
                "text-embedding-3-small"
            ]
        );
    }

    #[test]
    fn test_declared_endpoints_and_budget() {
        let models = converted();
        let claude = &models[0];
        assert_eq!(claude.display_name, "Claude Sonnet 4.5");
        assert_eq!(claude.description, "Claude Sonnet 4.5 via GitHub Copilot");
        assert_eq!(claude.supported_endpoints, vec!["/chat/completions"]);
        assert_eq!(claude.reasoning, Some(ReasoningSupport::budget(1024, 32_000)));
        assert_eq!(claude.context_length, Some(144_000));
    }

    #[test]
    fn test_inferred_codex_endpoint_and_levels() {
        let models = converted();
        let codex = &models[1];
        assert_eq!(codex.supported_endpoints, vec!["/responses"]);
        assert_eq!(codex.reasoning, Some(ReasoningSupport::standard_levels()));
    }

    #[test]
    fn test_defaults_and_name_fallback() {
        let models = converted();
        let o3 = &models[2];
        assert_eq!(o3.display_name, "o3-mini");
        assert_eq!(o3.context_length, Some(128_000));
        assert_eq!(o3.max_completion_tokens, Some(16_384));
        assert!(o3.reasoning.is_some());

        let embedding = &models[3];
        assert!(embedding.supported_endpoints.is_empty());
        assert!(embedding.reasoning.is_none());
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = ListingDefaults {
            context_length: 64_000,
            max_completion_tokens: 8192,
        };
        let models = descriptors_from_listing(r#"[{ "id": "grok-code-fast-1" }]"#, &defaults, 0)
            .unwrap();
        assert_eq!(models[0].context_length, Some(64_000));
        assert_eq!(models[0].max_completion_tokens, Some(8192));
        assert!(models[0].reasoning.is_none());
    }

    #[test]
    fn test_rejects_non_listing() {
        assert!(descriptors_from_listing(r#"{ "models": 3 }"#, &ListingDefaults::default(), 0).is_err());
    }
}
