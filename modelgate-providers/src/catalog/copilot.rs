//! GitHub Copilot capability table.
//!
//! Generated from a saved `/models` listing (see [`crate::listing`]) and
//! de-duplicated by id.

use std::sync::OnceLock;

use modelgate_core::{ModelDescriptor, ReasoningSupport};

const OWNER: &str = "github-copilot";
const CREATED: i64 = 1_768_908_139;

const CHAT: &[&str] = &["/chat/completions"];
const CHAT_AND_RESPONSES: &[&str] = &["/chat/completions", "/responses"];
const RESPONSES: &[&str] = &["/responses"];

static TABLE: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();

/// Returns the GitHub Copilot models.
pub fn models() -> &'static [ModelDescriptor] {
    TABLE.get_or_init(build)
}

fn model(id: &str, name: &str, context: u32, output: u32, endpoints: &[&str]) -> ModelDescriptor {
    ModelDescriptor::new(id)
        .display_name(name)
        .description(format!("{name} via GitHub Copilot"))
        .context_length(context)
        .max_completion_tokens(output)
        .endpoints(endpoints)
        .owned(OWNER, OWNER)
        .created(CREATED)
}

fn budget(model: ModelDescriptor, min: u32, max: u32) -> ModelDescriptor {
    model.reasoning(ReasoningSupport::budget(min, max))
}

fn levels(model: ModelDescriptor) -> ModelDescriptor {
    model.reasoning(ReasoningSupport::standard_levels())
}

fn build() -> Vec<ModelDescriptor> {
    vec![
        // Anthropic
        budget(model("claude-haiku-4.5", "Claude Haiku 4.5", 144_000, 16_000, CHAT), 1024, 32_000),
        budget(model("claude-opus-4.5", "Claude Opus 4.5", 160_000, 16_000, CHAT), 1024, 32_000),
        budget(model("claude-sonnet-4", "Claude Sonnet 4", 216_000, 16_000, CHAT), 1024, 32_000),
        budget(model("claude-sonnet-4.5", "Claude Sonnet 4.5", 144_000, 16_000, CHAT), 1024, 32_000),
        // Google
        budget(model("gemini-2.5-pro", "Gemini 2.5 Pro", 128_000, 64_000, CHAT), 128, 32_768),
        budget(
            model("gemini-3-flash-preview", "Gemini 3 Flash (Preview)", 128_000, 64_000, CHAT),
            256,
            32_000,
        ),
        budget(
            model("gemini-3-pro-preview", "Gemini 3 Pro (Preview)", 128_000, 64_000, CHAT),
            258,
            32_000,
        ),
        // OpenAI
        levels(model("gpt-3.5-turbo", "GPT 3.5 Turbo", 16_384, 4096, CHAT)),
        levels(model("gpt-3.5-turbo-0613", "GPT 3.5 Turbo", 16_384, 4096, CHAT)),
        levels(model("gpt-4", "GPT 4", 32_768, 4096, CHAT)),
        levels(model("gpt-4-0125-preview", "GPT 4 Turbo", 128_000, 4096, CHAT)),
        levels(model("gpt-4-0613", "GPT 4", 32_768, 4096, CHAT)),
        levels(model("gpt-4-o-preview", "GPT-4o", 128_000, 4096, CHAT)),
        levels(model("gpt-4.1", "GPT-4.1", 128_000, 16_384, CHAT)),
        levels(model("gpt-4.1-2025-04-14", "GPT-4.1", 128_000, 16_384, CHAT)),
        levels(model("gpt-4o", "GPT-4o", 128_000, 4096, CHAT)),
        levels(model("gpt-4o-2024-05-13", "GPT-4o", 128_000, 4096, CHAT)),
        levels(model("gpt-4o-2024-08-06", "GPT-4o", 128_000, 16_384, CHAT)),
        levels(model("gpt-4o-2024-11-20", "GPT-4o", 128_000, 16_384, CHAT)),
        levels(model("gpt-4o-mini", "GPT-4o mini", 128_000, 4096, CHAT)),
        levels(model("gpt-4o-mini-2024-07-18", "GPT-4o mini", 128_000, 4096, CHAT)),
        levels(model("gpt-5", "GPT-5", 400_000, 128_000, CHAT_AND_RESPONSES)),
        levels(model("gpt-5-codex", "GPT-5-Codex (Preview)", 400_000, 128_000, RESPONSES)),
        levels(model("gpt-5-mini", "GPT-5 mini", 264_000, 64_000, CHAT)),
        levels(model("gpt-5.1", "GPT-5.1", 264_000, 64_000, CHAT_AND_RESPONSES)),
        levels(model("gpt-5.1-codex", "GPT-5.1-Codex", 400_000, 128_000, RESPONSES)),
        levels(model("gpt-5.1-codex-max", "GPT-5.1-Codex-Max", 400_000, 128_000, RESPONSES)),
        levels(model("gpt-5.1-codex-mini", "GPT-5.1-Codex-Mini", 400_000, 128_000, RESPONSES)),
        levels(model("gpt-5.2", "GPT-5.2", 264_000, 64_000, CHAT_AND_RESPONSES)),
        levels(model("gpt-5.2-codex", "GPT-5.2-Codex", 400_000, 128_000, RESPONSES)),
        // xAI
        model("grok-code-fast-1", "Grok Code Fast 1", 128_000, 64_000, CHAT),
        // Embeddings accept no chat endpoint.
        model("text-embedding-3-small", "Embedding V3 small", 128_000, 16_384, &[]),
        model(
            "text-embedding-3-small-inference",
            "Embedding V3 small (Inference)",
            128_000,
            16_384,
            &[],
        ),
        model("text-embedding-ada-002", "Embedding V2 Ada", 128_000, 16_384, &[]),
    ]
}
