//! Gemini-family capability tables.
//!
//! The `gemini`, `vertex`, `gemini-cli` and `aistudio` channels serve largely
//! the same models through different executors, so the tables share one
//! builder and differ in channel tag and a few extras.

use std::sync::OnceLock;

use modelgate_core::{EffortLevel, ModelDescriptor, ReasoningSupport};

const OWNER: &str = "google";
const CONTEXT: u32 = 1_048_576;
const OUTPUT: u32 = 65_536;
const GENERATE: &[&str] = &["generateContent"];

static GEMINI: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();
static VERTEX: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();
static GEMINI_CLI: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();
static AI_STUDIO: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();

/// Returns the Gemini API models.
pub fn gemini_models() -> &'static [ModelDescriptor] {
    GEMINI.get_or_init(|| family("gemini"))
}

/// Returns the Vertex AI models.
pub fn vertex_models() -> &'static [ModelDescriptor] {
    VERTEX.get_or_init(|| family("vertex"))
}

/// Returns the Gemini CLI models.
pub fn gemini_cli_models() -> &'static [ModelDescriptor] {
    GEMINI_CLI.get_or_init(|| family("gemini-cli"))
}

/// Returns the AI Studio models.
pub fn aistudio_models() -> &'static [ModelDescriptor] {
    AI_STUDIO.get_or_init(|| {
        let mut models = family("aistudio");
        models.push(
            gemini("aistudio", "gemini-2.5-flash-image", "Gemini 2.5 Flash Image", 1_756_166_400)
                .context_length(32_768)
                .max_completion_tokens(32_768),
        );
        models
    })
}

fn gemini(channel_tag: &str, id: &str, name: &str, created: i64) -> ModelDescriptor {
    ModelDescriptor::new(id)
        .display_name(name)
        .description(format!("{name} ({id})"))
        .context_length(CONTEXT)
        .max_completion_tokens(OUTPUT)
        .endpoints(GENERATE)
        .owned(OWNER, channel_tag)
        .created(created)
}

fn family(channel_tag: &str) -> Vec<ModelDescriptor> {
    vec![
        gemini(channel_tag, "gemini-2.5-pro", "Gemini 2.5 Pro", 1_750_118_400)
            .reasoning(ReasoningSupport::budget_with(128, 32_768, false, true)),
        gemini(channel_tag, "gemini-2.5-flash", "Gemini 2.5 Flash", 1_750_118_400)
            .reasoning(ReasoningSupport::budget_with(0, 24_576, true, true)),
        gemini(channel_tag, "gemini-2.5-flash-lite", "Gemini 2.5 Flash Lite", 1_753_142_400)
            .reasoning(ReasoningSupport::budget_with(512, 24_576, true, true)),
        gemini(channel_tag, "gemini-3-pro-preview", "Gemini 3 Pro Preview", 1_737_158_400)
            .reasoning(ReasoningSupport::Levels {
                levels: vec![EffortLevel::Low, EffortLevel::High],
            }),
    ]
}
