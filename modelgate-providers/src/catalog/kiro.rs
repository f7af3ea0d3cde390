//! Kiro and Amazon Q capability tables.
//!
//! Both channels route through the same CodeWhisperer executor, so every
//! descriptor carries the `kiro` channel tag.

use std::sync::OnceLock;

use modelgate_core::{ModelDescriptor, ReasoningSupport};

const OWNER: &str = "aws";
const CHANNEL_TAG: &str = "kiro";
const CREATED: i64 = 1_732_752_000;
const CONTEXT: u32 = 200_000;
const OUTPUT: u32 = 64_000;

static KIRO: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();
static AMAZON_Q: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();

/// Returns the Kiro models.
pub fn kiro_models() -> &'static [ModelDescriptor] {
    KIRO.get_or_init(build_kiro)
}

/// Returns the Amazon Q models.
pub fn amazonq_models() -> &'static [ModelDescriptor] {
    AMAZON_Q.get_or_init(build_amazonq)
}

fn base(id: &str, name: &str, description: &str) -> ModelDescriptor {
    ModelDescriptor::new(id)
        .display_name(name)
        .description(description)
        .context_length(CONTEXT)
        .max_completion_tokens(OUTPUT)
        .owned(OWNER, CHANNEL_TAG)
        .created(CREATED)
}

fn kiro(id: &str, name: &str, description: &str) -> ModelDescriptor {
    base(id, name, description).reasoning(ReasoningSupport::budget_with(1024, 32_000, true, true))
}

fn build_kiro() -> Vec<ModelDescriptor> {
    vec![
        kiro("kiro-auto", "Kiro Auto", "Automatic model selection by Kiro"),
        kiro(
            "kiro-claude-opus-4-5",
            "Kiro Claude Opus 4.5",
            "Claude Opus 4.5 via Kiro (2.2x credit)",
        ),
        kiro(
            "kiro-claude-sonnet-4-5",
            "Kiro Claude Sonnet 4.5",
            "Claude Sonnet 4.5 via Kiro (1.3x credit)",
        ),
        kiro(
            "kiro-claude-sonnet-4",
            "Kiro Claude Sonnet 4",
            "Claude Sonnet 4 via Kiro (1.3x credit)",
        ),
        kiro(
            "kiro-claude-haiku-4-5",
            "Kiro Claude Haiku 4.5",
            "Claude Haiku 4.5 via Kiro (0.4x credit)",
        ),
        // Agentic variants split large writes into chunks.
        kiro(
            "kiro-claude-opus-4-5-agentic",
            "Kiro Claude Opus 4.5 (Agentic)",
            "Claude Opus 4.5 optimized for coding agents (chunked writes)",
        ),
        kiro(
            "kiro-claude-sonnet-4-5-agentic",
            "Kiro Claude Sonnet 4.5 (Agentic)",
            "Claude Sonnet 4.5 optimized for coding agents (chunked writes)",
        ),
        kiro(
            "kiro-claude-sonnet-4-agentic",
            "Kiro Claude Sonnet 4 (Agentic)",
            "Claude Sonnet 4 optimized for coding agents (chunked writes)",
        ),
        kiro(
            "kiro-claude-haiku-4-5-agentic",
            "Kiro Claude Haiku 4.5 (Agentic)",
            "Claude Haiku 4.5 optimized for coding agents (chunked writes)",
        ),
    ]
}

fn build_amazonq() -> Vec<ModelDescriptor> {
    vec![
        base("amazonq-auto", "Amazon Q Auto", "Automatic model selection by Amazon Q"),
        base(
            "amazonq-claude-opus-4.5",
            "Amazon Q Claude Opus 4.5",
            "Claude Opus 4.5 via Amazon Q (2.2x credit)",
        ),
        base(
            "amazonq-claude-sonnet-4.5",
            "Amazon Q Claude Sonnet 4.5",
            "Claude Sonnet 4.5 via Amazon Q (1.3x credit)",
        ),
        base(
            "amazonq-claude-sonnet-4",
            "Amazon Q Claude Sonnet 4",
            "Claude Sonnet 4 via Amazon Q (1.3x credit)",
        ),
        base(
            "amazonq-claude-haiku-4.5",
            "Amazon Q Claude Haiku 4.5",
            "Claude Haiku 4.5 via Amazon Q (0.4x credit)",
        ),
    ]
}
