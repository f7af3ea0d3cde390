//! Capability registry over all channel tables.
//!
//! The registry answers two questions: which models a channel serves, and
//! which descriptor a bare model id refers to. Ids are only unique within a
//! channel, so global lookup walks [`LOOKUP_PRIORITY`] and the first channel
//! that defines the id wins.

use std::borrow::Cow;
use std::sync::Arc;

use modelgate_core::{Channel, ModelDescriptor, ModelOverrideMap};
use tracing::debug;

use crate::catalog::{self, antigravity};

/// Order in which array-backed channels are scanned by
/// [`CapabilityRegistry::lookup_by_id`].
///
/// When two channels define the same id, the one listed first here is
/// returned. Antigravity is consulted only after every channel listed here.
///
/// The list covers every array-backed channel, including github-copilot,
/// kiro and amazonq, so ids served only by those tables (such as `gpt-4o`)
/// are found by global lookup too.
pub const LOOKUP_PRIORITY: [Channel; 11] = [
    Channel::Claude,
    Channel::Gemini,
    Channel::Vertex,
    Channel::GeminiCli,
    Channel::AiStudio,
    Channel::Codex,
    Channel::Qwen,
    Channel::IFlow,
    Channel::GithubCopilot,
    Channel::Kiro,
    Channel::AmazonQ,
];

// ============================================================================
// Capability Registry
// ============================================================================

/// Read-only view over the capability tables.
///
/// Cloning is cheap; the Antigravity override map is shared.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    antigravity: Arc<ModelOverrideMap>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityRegistry {
    /// Creates a registry using the built-in Antigravity overrides.
    pub fn new() -> Self {
        Self::with_antigravity(antigravity::default_overrides().clone())
    }

    /// Creates a registry with a custom Antigravity override map.
    pub fn with_antigravity(overrides: ModelOverrideMap) -> Self {
        Self {
            antigravity: Arc::new(overrides),
        }
    }

    /// Returns every known channel.
    pub fn channels() -> &'static [Channel] {
        Channel::all()
    }

    /// Returns the models served by `channel`.
    ///
    /// The key is trimmed and matched case-insensitively. Unknown keys yield
    /// an empty sequence.
    pub fn models_for_channel(&self, channel: &str) -> Cow<'static, [ModelDescriptor]> {
        match Channel::parse(channel) {
            Some(channel) => self.models(channel),
            None => {
                debug!(channel, "Unknown channel");
                Cow::Borrowed(&[])
            }
        }
    }

    /// Returns the models served by a parsed channel.
    pub fn models(&self, channel: Channel) -> Cow<'static, [ModelDescriptor]> {
        match channel {
            Channel::Antigravity => Cow::Owned(antigravity::derive_models(&self.antigravity)),
            other => Cow::Borrowed(catalog::table(other)),
        }
    }

    /// Finds a model by id across all channels.
    ///
    /// Empty ids are never found. Collisions resolve by [`LOOKUP_PRIORITY`].
    pub fn lookup_by_id(&self, id: &str) -> Option<Cow<'static, ModelDescriptor>> {
        self.lookup_with_channel(id).map(|(_, model)| model)
    }

    /// Like [`lookup_by_id`](Self::lookup_by_id), also reporting the channel
    /// that supplied the descriptor.
    pub fn lookup_with_channel(
        &self,
        id: &str,
    ) -> Option<(Channel, Cow<'static, ModelDescriptor>)> {
        if id.is_empty() {
            return None;
        }

        let found = LOOKUP_PRIORITY.iter().find_map(|channel| {
            catalog::table(*channel)
                .iter()
                .find(|m| m.id == id)
                .map(|m| (*channel, Cow::Borrowed(m)))
        });
        if found.is_some() {
            return found;
        }

        antigravity::lookup(&self.antigravity, id)
            .map(|model| (Channel::Antigravity, Cow::Owned(model)))
    }

    /// Returns every channel that defines `id`, in priority order.
    pub fn channels_defining(&self, id: &str) -> Vec<Channel> {
        if id.is_empty() {
            return Vec::new();
        }
        let mut channels: Vec<Channel> = LOOKUP_PRIORITY
            .iter()
            .copied()
            .filter(|channel| catalog::table(*channel).iter().any(|m| m.id == id))
            .collect();
        if antigravity::lookup(&self.antigravity, id).is_some() {
            channels.push(Channel::Antigravity);
        }
        channels
    }

    /// Returns the number of models a channel serves.
    pub fn count(&self, channel: Channel) -> usize {
        self.models(channel).len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use modelgate_core::ModelOverride;

    #[test]
    fn test_priority_covers_every_array_channel() {
        for channel in Channel::all() {
            let listed = LOOKUP_PRIORITY.contains(channel);
            assert_eq!(listed, *channel != Channel::Antigravity, "{channel}");
        }
    }

    #[test]
    fn test_unknown_channel_is_empty() {
        let registry = CapabilityRegistry::new();
        assert!(registry.models_for_channel("does-not-exist").is_empty());
        assert!(registry.models_for_channel("").is_empty());
        assert!(registry.models_for_channel("openai").is_empty());
    }

    #[test]
    fn test_channel_key_normalization() {
        let registry = CapabilityRegistry::new();
        let lower = registry.models_for_channel("github-copilot");
        let messy = registry.models_for_channel("  GitHub-Copilot \t");
        assert!(!lower.is_empty());
        assert_eq!(lower, messy);
    }

    #[test]
    fn test_antigravity_sorted_and_non_empty_ids() {
        let registry = CapabilityRegistry::new();
        let models = registry.models_for_channel("antigravity");
        assert!(!models.is_empty());

        let keys: Vec<String> = models.iter().map(|m| m.id.to_lowercase()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(models.iter().all(|m| !m.id.is_empty()));
    }

    #[test]
    fn test_lookup_empty_id() {
        let registry = CapabilityRegistry::new();
        assert!(registry.lookup_by_id("").is_none());
        assert!(registry.channels_defining("").is_empty());
    }

    #[test]
    fn test_lookup_unknown_id() {
        assert!(CapabilityRegistry::new().lookup_by_id("no-such-model").is_none());
    }

    #[test]
    fn test_collision_resolves_by_priority() {
        let registry = CapabilityRegistry::new();
        assert_eq!(
            registry.channels_defining("gemini-2.5-pro"),
            vec![
                Channel::Gemini,
                Channel::Vertex,
                Channel::GeminiCli,
                Channel::AiStudio,
                Channel::GithubCopilot,
            ]
        );

        for _ in 0..3 {
            let (channel, model) = registry.lookup_with_channel("gemini-2.5-pro").unwrap();
            assert_eq!(channel, Channel::Gemini);
            assert_eq!(model.channel_tag, "gemini");
        }
    }

    #[test]
    fn test_collision_codex_before_copilot() {
        let registry = CapabilityRegistry::new();
        let model = registry.lookup_by_id("gpt-5").unwrap();
        assert_eq!(model.owned_by, "openai");
    }

    #[test]
    fn test_collision_qwen_before_iflow() {
        let registry = CapabilityRegistry::new();
        let (channel, _) = registry.lookup_with_channel("qwen3-coder-plus").unwrap();
        assert_eq!(channel, Channel::Qwen);
    }

    #[test]
    fn test_lookup_copilot_only_model() {
        let registry = CapabilityRegistry::new();
        let (channel, model) = registry.lookup_with_channel("grok-code-fast-1").unwrap();
        assert_eq!(channel, Channel::GithubCopilot);
        assert_eq!(model.context_length, Some(128_000));
        let (channel, model) = registry.lookup_with_channel("gpt-4o").unwrap();
        assert_eq!(channel, Channel::GithubCopilot);
        assert_eq!(model.max_completion_tokens, Some(4096));
    }

    #[test]
    fn test_lookup_falls_back_to_antigravity() {
        let registry = CapabilityRegistry::new();
        let (channel, model) = registry
            .lookup_with_channel("gemini-claude-sonnet-4-5-thinking")
            .unwrap();
        assert_eq!(channel, Channel::Antigravity);
        assert_eq!(model.max_completion_tokens, Some(64_000));
    }

    #[test]
    fn test_array_tables_shadow_antigravity() {
        let mut overrides = ModelOverrideMap::new();
        overrides.insert(
            "kiro-auto".to_string(),
            Some(ModelOverride::new(None, Some(1))),
        );
        let registry = CapabilityRegistry::with_antigravity(overrides);

        let (channel, model) = registry.lookup_with_channel("kiro-auto").unwrap();
        assert_eq!(channel, Channel::Kiro);
        assert_eq!(model.max_completion_tokens, Some(64_000));
    }

    #[test]
    fn test_custom_antigravity_map() {
        let mut overrides = ModelOverrideMap::new();
        overrides.insert("zeta".to_string(), Some(ModelOverride::default()));
        overrides.insert("Alpha".to_string(), Some(ModelOverride::default()));
        overrides.insert(String::new(), Some(ModelOverride::default()));
        overrides.insert("off".to_string(), None);
        let registry = CapabilityRegistry::with_antigravity(overrides);

        let ids: Vec<String> = registry
            .models(Channel::Antigravity)
            .iter()
            .map(|m| m.id.clone())
            .collect();
        assert_eq!(ids, vec!["Alpha", "zeta"]);
        assert!(registry.lookup_by_id("off").is_none());
    }

    #[test]
    fn test_counts() {
        let registry = CapabilityRegistry::new();
        assert_eq!(registry.count(Channel::Kiro), 9);
        assert_eq!(registry.count(Channel::AmazonQ), 5);
    }
}
