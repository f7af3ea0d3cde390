//! Static capability tables, one per channel.
//!
//! Every table is built once on first access and never mutated, so concurrent
//! readers share it without locking.

pub mod anthropic;
pub mod antigravity;
pub mod copilot;
pub mod google;
pub mod kiro;
pub mod openai;
pub mod qwen;

use modelgate_core::{Channel, ModelDescriptor};

/// Returns the fixed table for an array-backed channel.
///
/// Antigravity is derived from configuration and has no fixed table, so it
/// yields an empty slice here.
pub fn table(channel: Channel) -> &'static [ModelDescriptor] {
    match channel {
        Channel::Claude => anthropic::models(),
        Channel::Gemini => google::gemini_models(),
        Channel::Vertex => google::vertex_models(),
        Channel::GeminiCli => google::gemini_cli_models(),
        Channel::AiStudio => google::aistudio_models(),
        Channel::Codex => openai::models(),
        Channel::Qwen => qwen::qwen_models(),
        Channel::IFlow => qwen::iflow_models(),
        Channel::GithubCopilot => copilot::models(),
        Channel::Kiro => kiro::kiro_models(),
        Channel::AmazonQ => kiro::amazonq_models(),
        Channel::Antigravity => &[],
    }
}
