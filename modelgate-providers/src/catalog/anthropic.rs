//! Claude capability table.

use std::sync::OnceLock;

use modelgate_core::{ModelDescriptor, ReasoningSupport};

const OWNER: &str = "anthropic";
const CHANNEL_TAG: &str = "claude";
const CONTEXT: u32 = 200_000;

static TABLE: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();

/// Returns the Claude models.
pub fn models() -> &'static [ModelDescriptor] {
    TABLE.get_or_init(build)
}

fn claude(id: &str, name: &str, created: i64, output: u32) -> ModelDescriptor {
    ModelDescriptor::new(id)
        .display_name(name)
        .description(format!("{name} by Anthropic"))
        .context_length(CONTEXT)
        .max_completion_tokens(output)
        .owned(OWNER, CHANNEL_TAG)
        .created(created)
}

fn thinking(model: ModelDescriptor, max: u32) -> ModelDescriptor {
    model.reasoning(ReasoningSupport::budget_with(1024, max, true, false))
}

fn build() -> Vec<ModelDescriptor> {
    vec![
        thinking(
            claude("claude-opus-4-5-20251101", "Claude 4.5 Opus", 1_761_955_200, 64_000),
            63_999,
        ),
        thinking(
            claude("claude-sonnet-4-5-20250929", "Claude 4.5 Sonnet", 1_759_104_000, 64_000),
            63_999,
        ),
        thinking(
            claude("claude-haiku-4-5-20251001", "Claude 4.5 Haiku", 1_759_276_800, 64_000),
            63_999,
        ),
        thinking(
            claude("claude-opus-4-1-20250805", "Claude 4.1 Opus", 1_722_945_600, 32_000),
            31_999,
        ),
        thinking(
            claude("claude-opus-4-20250514", "Claude 4 Opus", 1_715_644_800, 32_000),
            31_999,
        ),
        thinking(
            claude("claude-sonnet-4-20250514", "Claude 4 Sonnet", 1_715_644_800, 64_000),
            63_999,
        ),
        thinking(
            claude("claude-3-7-sonnet-20250219", "Claude 3.7 Sonnet", 1_708_300_800, 8192),
            8191,
        ),
        claude("claude-3-5-haiku-20241022", "Claude 3.5 Haiku", 1_729_555_200, 8192),
    ]
}
