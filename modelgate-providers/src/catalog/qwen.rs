//! Qwen and iFlow capability tables.

use std::sync::OnceLock;

use modelgate_core::{ModelDescriptor, ReasoningSupport};

const CHAT: &[&str] = &["/chat/completions"];

static QWEN: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();
static IFLOW: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();

/// Returns the Qwen Code models.
pub fn qwen_models() -> &'static [ModelDescriptor] {
    QWEN.get_or_init(build_qwen)
}

/// Returns the iFlow models.
pub fn iflow_models() -> &'static [ModelDescriptor] {
    IFLOW.get_or_init(build_iflow)
}

fn chat(owner: &str, id: &str, name: &str, context: u32, output: u32) -> ModelDescriptor {
    ModelDescriptor::new(id)
        .display_name(name)
        .description(name)
        .context_length(context)
        .max_completion_tokens(output)
        .endpoints(CHAT)
        .owned(owner, owner)
}

fn build_qwen() -> Vec<ModelDescriptor> {
    vec![
        chat("qwen", "qwen3-coder-plus", "Qwen3 Coder Plus", 1_048_576, 65_536)
            .created(1_753_228_800),
        chat("qwen", "qwen3-coder-flash", "Qwen3 Coder Flash", 1_048_576, 65_536)
            .created(1_753_228_800),
        chat("qwen", "vision-model", "Qwen3 Vision Model", 32_768, 2048).created(1_758_672_000),
    ]
}

fn build_iflow() -> Vec<ModelDescriptor> {
    let created = 1_757_030_400;
    vec![
        chat("iflow", "tstars2.0", "TStars-2.0", 128_000, 32_000).created(created),
        // Same id as the Qwen channel; lookups resolve to Qwen first.
        chat("iflow", "qwen3-coder-plus", "Qwen3-Coder-Plus", 256_000, 64_000).created(created),
        chat("iflow", "qwen3-max", "Qwen3-Max", 256_000, 32_000).created(created),
        chat("iflow", "kimi-k2", "Kimi-K2", 128_000, 64_000).created(created),
        chat("iflow", "kimi-k2-0905", "Kimi-K2-Instruct-0905", 256_000, 64_000).created(created),
        chat("iflow", "deepseek-v3.2", "DeepSeek-V3.2-Exp", 128_000, 64_000).created(created),
        chat("iflow", "deepseek-r1", "DeepSeek-R1", 128_000, 32_000)
            .reasoning(ReasoningSupport::budget_with(1024, 32_000, false, true))
            .created(created),
        chat("iflow", "glm-4.6", "GLM-4.6", 200_000, 128_000)
            .reasoning(ReasoningSupport::budget_with(1024, 32_000, true, false))
            .created(created),
    ]
}
