//! Routing channels.
//!
//! A channel names one provider/account-type family inside the gateway.
//! Every channel owns exactly one capability table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal routing family a model belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// Anthropic Claude
    Claude,
    /// Google Gemini API
    Gemini,
    /// Google Cloud Vertex AI
    Vertex,
    /// Gemini CLI (Cloud Code Assist)
    GeminiCli,
    /// Google AI Studio
    #[serde(rename = "aistudio")]
    AiStudio,
    /// OpenAI Codex
    Codex,
    /// Alibaba Qwen
    Qwen,
    /// iFlow
    #[serde(rename = "iflow")]
    IFlow,
    /// GitHub Copilot
    GithubCopilot,
    /// Kiro (AWS CodeWhisperer)
    Kiro,
    /// Amazon Q (shares the Kiro back end)
    #[serde(rename = "amazonq")]
    AmazonQ,
    /// Antigravity; its table is derived from a keyed override map.
    Antigravity,
}

impl Channel {
    /// Returns every channel, in declaration order.
    pub fn all() -> &'static [Channel] {
        &[
            Self::Claude,
            Self::Gemini,
            Self::Vertex,
            Self::GeminiCli,
            Self::AiStudio,
            Self::Codex,
            Self::Qwen,
            Self::IFlow,
            Self::GithubCopilot,
            Self::Kiro,
            Self::AmazonQ,
            Self::Antigravity,
        ]
    }

    /// Returns the canonical lowercase channel key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Vertex => "vertex",
            Self::GeminiCli => "gemini-cli",
            Self::AiStudio => "aistudio",
            Self::Codex => "codex",
            Self::Qwen => "qwen",
            Self::IFlow => "iflow",
            Self::GithubCopilot => "github-copilot",
            Self::Kiro => "kiro",
            Self::AmazonQ => "amazonq",
            Self::Antigravity => "antigravity",
        }
    }

    /// Parses a channel key, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim().to_ascii_lowercase();
        Self::all().iter().copied().find(|c| c.key() == key)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
