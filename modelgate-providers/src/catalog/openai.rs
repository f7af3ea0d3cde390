//! Codex (OpenAI) capability table.

use std::sync::OnceLock;

use modelgate_core::{EffortLevel, ModelDescriptor, ReasoningSupport};

const OWNER: &str = "openai";
const CHANNEL_TAG: &str = "openai";
const CONTEXT: u32 = 400_000;
const OUTPUT: u32 = 128_000;
const RESPONSES: &[&str] = &["/responses"];

static TABLE: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();

/// Returns the Codex models.
pub fn models() -> &'static [ModelDescriptor] {
    TABLE.get_or_init(build)
}

fn gpt(id: &str, name: &str, created: i64, levels: &[EffortLevel]) -> ModelDescriptor {
    ModelDescriptor::new(id)
        .display_name(name)
        .description(format!("Stable version of {name}"))
        .context_length(CONTEXT)
        .max_completion_tokens(OUTPUT)
        .endpoints(RESPONSES)
        .reasoning(ReasoningSupport::Levels {
            levels: levels.to_vec(),
        })
        .owned(OWNER, CHANNEL_TAG)
        .created(created)
}

fn build() -> Vec<ModelDescriptor> {
    use EffortLevel::{High, Low, Medium, Minimal};

    vec![
        gpt("gpt-5", "GPT 5", 1_754_524_800, &[Minimal, Low, Medium, High]),
        gpt("gpt-5-codex", "GPT 5 Codex", 1_757_894_400, &[Low, Medium, High]),
        gpt("gpt-5-codex-mini", "GPT 5 Codex Mini", 1_762_473_600, &[Medium, High]),
        gpt("gpt-5.1", "GPT 5.1", 1_762_905_600, &[Low, Medium, High]),
        gpt("gpt-5.1-codex", "GPT 5.1 Codex", 1_762_905_600, &[Low, Medium, High]),
        gpt("gpt-5.1-codex-mini", "GPT 5.1 Codex Mini", 1_762_905_600, &[Medium, High]),
        gpt("gpt-5.1-codex-max", "GPT 5.1 Codex Max", 1_763_424_000, &[Low, Medium, High]),
        gpt("gpt-5.2", "GPT 5.2", 1_765_440_000, &[Low, Medium, High]),
    ]
}
