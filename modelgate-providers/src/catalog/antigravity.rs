//! Antigravity capability overrides.
//!
//! Antigravity has no fixed table. Its models are derived on every call from
//! a keyed override map, which defaults to [`default_overrides`] and can be
//! replaced from configuration.

use std::sync::OnceLock;

use modelgate_core::{ModelDescriptor, ModelOverride, ModelOverrideMap, ReasoningSupport};

const OWNER: &str = "antigravity";

static DEFAULTS: OnceLock<ModelOverrideMap> = OnceLock::new();

/// Returns the built-in override map.
pub fn default_overrides() -> &'static ModelOverrideMap {
    DEFAULTS.get_or_init(build_defaults)
}

fn build_defaults() -> ModelOverrideMap {
    let flash = ReasoningSupport::budget_with(0, 24_576, true, true);
    let pro = ReasoningSupport::budget_with(128, 32_768, false, true);
    let claude = ReasoningSupport::budget_with(1024, 200_000, true, false);

    [
        ("gemini-2.5-flash", Some(ModelOverride::new(Some(flash.clone()), None))),
        ("gemini-2.5-flash-lite", Some(ModelOverride::new(Some(flash), None))),
        ("gemini-3-pro-high", Some(ModelOverride::new(Some(pro.clone()), None))),
        ("gemini-3-pro-low", Some(ModelOverride::new(Some(pro), None))),
        (
            "gemini-claude-sonnet-4-5",
            Some(ModelOverride::new(None, Some(64_000))),
        ),
        (
            "gemini-claude-sonnet-4-5-thinking",
            Some(ModelOverride::new(Some(claude.clone()), Some(64_000))),
        ),
        (
            "gemini-claude-opus-4-5-thinking",
            Some(ModelOverride::new(Some(claude), Some(64_000))),
        ),
        // Listed upstream but not served.
        ("gemini-2.5-computer-use-preview-10-2025", None),
    ]
    .into_iter()
    .map(|(id, entry)| (id.to_string(), entry))
    .collect()
}

/// Derives the channel's descriptors from an override map.
///
/// Entries with an empty id or a `None` override are skipped. The result is
/// sorted by id, case-insensitively.
pub fn derive_models(overrides: &ModelOverrideMap) -> Vec<ModelDescriptor> {
    let mut models: Vec<ModelDescriptor> = overrides
        .iter()
        .filter(|(id, _)| !id.is_empty())
        .filter_map(|(id, entry)| {
            entry
                .as_ref()
                .map(|entry| descriptor(id, entry).owned(OWNER, OWNER))
        })
        .collect();

    models.sort_by_cached_key(|m| m.id.to_lowercase());
    models
}

/// Looks up one id in an override map.
///
/// The descriptor carries only id, reasoning and output cap.
pub fn lookup(overrides: &ModelOverrideMap, id: &str) -> Option<ModelDescriptor> {
    if id.is_empty() {
        return None;
    }
    overrides
        .get(id)?
        .as_ref()
        .map(|entry| descriptor(id, entry))
}

fn descriptor(id: &str, entry: &ModelOverride) -> ModelDescriptor {
    let mut model = ModelDescriptor::new(id);
    model.reasoning = entry.thinking.clone();
    model.max_completion_tokens = entry.max_completion_tokens.filter(|tokens| *tokens > 0);
    model
}

// ============================================================================
// Tests
// ============================================================================
