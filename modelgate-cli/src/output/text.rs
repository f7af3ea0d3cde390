//! Text output formatting with progress bars and colors.

use chrono::{DateTime, Duration, Local, Utc};
use modelgate_core::{ModelDescriptor, QuotaCategory, ReasoningSupport, UsageSnapshot};

use super::AccountOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    show_reset_countdown: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            show_reset_countdown: true,
            bar_width: 10,
        }
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    /// Formats the channel list header.
    pub fn format_channels_header(&self) -> String {
        format!("{:<16} {}", self.bold("Channel"), self.bold("Models"))
    }

    /// Formats one channel line.
    pub fn format_channel_line(&self, channel: &str, count: usize) -> String {
        let count = if count == 0 {
            self.dim("0")
        } else {
            count.to_string()
        };
        format!("{channel:<16} {count}")
    }

    /// Formats a model table.
    pub fn format_models(&self, models: &[ModelDescriptor]) -> String {
        let mut lines = Vec::with_capacity(models.len() + 2);
        lines.push(format!(
            "{:<40} {:>9} {:>9}  {:<22} {}",
            self.bold("Model"),
            self.bold("Context"),
            self.bold("Output"),
            self.bold("Reasoning"),
            self.bold("Endpoints")
        ));
        lines.push("─".repeat(100));

        for model in models {
            lines.push(format!(
                "{:<40} {:>9} {:>9}  {:<22} {}",
                model.id,
                self.format_limit(model.context_length),
                self.format_limit(model.max_completion_tokens),
                model
                    .reasoning
                    .as_ref()
                    .map_or_else(|| "−".to_string(), format_reasoning),
                if model.supported_endpoints.is_empty() {
                    "−".to_string()
                } else {
                    model.supported_endpoints.join(", ")
                }
            ));
        }

        lines.join("\n")
    }

    /// Formats one model in detail.
    pub fn format_model_detail(&self, channel: &str, model: &ModelDescriptor) -> String {
        let mut lines = vec![format!("{} ({})", self.bold(model.label()), self.cyan(channel))];

        lines.push(format!("Id:        {}", model.id));
        if !model.description.is_empty() {
            lines.push(format!("About:     {}", model.description));
        }
        if !model.owned_by.is_empty() {
            lines.push(format!("Owner:     {}", model.owned_by));
        }
        lines.push(format!("Context:   {}", self.format_limit(model.context_length)));
        lines.push(format!(
            "Output:    {}",
            self.format_limit(model.max_completion_tokens)
        ));
        if let Some(reasoning) = &model.reasoning {
            lines.push(format!("Reasoning: {}", format_reasoning(reasoning)));
        }
        if !model.supported_endpoints.is_empty() {
            lines.push(format!("Endpoints: {}", model.supported_endpoints.join(", ")));
        }

        lines.join("\n")
    }

    fn format_limit(&self, tokens: Option<u32>) -> String {
        tokens.map_or_else(|| "−".to_string(), |t| self.format_number(f64::from(t)))
    }

    // ========================================================================
    // Quota
    // ========================================================================

    /// Formats quota for one account.
    pub fn format_quota(&self, account: &str, snapshot: &UsageSnapshot) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} ({})",
            self.bold(account),
            snapshot.provider.display_name()
        ));

        if !snapshot.plan_label.is_empty() {
            lines.push(format!("Plan:    {}", self.blue(&snapshot.plan_label)));
        }

        if snapshot.usage_limit > 0.0 || snapshot.current_usage > 0.0 {
            let mut usage = format!(
                "Usage:   {} / {}",
                format_quantity(snapshot.current_usage),
                format_quantity(snapshot.usage_limit)
            );
            if let Some(remaining) = snapshot.remaining_percent() {
                usage.push_str(&format!(
                    "  {} {}",
                    self.progress_bar(remaining),
                    self.color_for_percent(remaining, &format!("{remaining:.0}% left"))
                ));
            }
            lines.push(usage);
        } else {
            lines.push(format!("Usage:   {}", self.dim("No data")));
        }

        for category in &snapshot.categories {
            lines.push(self.format_category(category));
        }

        if let Some(reset_at) = snapshot.reset_at {
            lines.push(format!("Resets   {}", self.dim(&self.format_reset_time(reset_at))));
        }

        lines.join("\n")
    }

    /// Formats one quota category.
    fn format_category(&self, category: &QuotaCategory) -> String {
        let label = format!("{}:", category.kind.display_name());
        if category.unlimited {
            return format!("  {label:<22} {}", self.green("unlimited"));
        }

        let remaining = category.percent_remaining.unwrap_or_else(|| {
            if category.entitlement > 0.0 {
                (category.remaining / category.entitlement * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            }
        });

        format!(
            "  {label:<22} {} {} ({} of {} left)",
            self.progress_bar(remaining),
            self.color_for_percent(remaining, &format!("{remaining:.0}%")),
            format_quantity(category.remaining),
            format_quantity(category.entitlement)
        )
    }

    /// Formats a progress bar.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        let percent = percent_remaining.clamp(0.0, 100.0);
        let filled = ((percent / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent, &bar)
    }

    /// Formats reset time as countdown or absolute.
    fn format_reset_time(&self, resets_at: DateTime<Utc>) -> String {
        let now = Utc::now();
        let local_reset = resets_at.with_timezone(&Local);

        if resets_at <= now {
            return "now".to_string();
        }

        let diff = resets_at - now;

        if self.show_reset_countdown && diff < Duration::hours(24) {
            if diff < Duration::hours(1) {
                let mins = diff.num_minutes();
                format!("in {mins} minute{}", if mins == 1 { "" } else { "s" })
            } else {
                let hours = diff.num_hours();
                let mins = diff.num_minutes() % 60;
                if mins > 0 {
                    format!("in {hours}h {mins}m")
                } else {
                    format!("in {hours} hour{}", if hours == 1 { "" } else { "s" })
                }
            }
        } else {
            let today = Local::now().date_naive();
            let reset_date = local_reset.date_naive();

            if reset_date == today + chrono::Days::new(1) {
                format!("tomorrow at {}", local_reset.format("%l:%M %p").to_string().trim())
            } else {
                local_reset.format("%a %b %e at %l:%M %p").to_string()
            }
        }
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Formats the account list header.
    pub fn format_accounts_header(&self) -> String {
        format!(
            "{:<40} {:<16} {}",
            self.bold("Account"),
            self.bold("Type"),
            self.bold("Status")
        )
    }

    /// Formats one account line.
    pub fn format_account_line(&self, account: &AccountOutput) -> String {
        let status = if !account.supported {
            self.dim("no quota adapter")
        } else if account.has_token {
            self.green("✓ ready")
        } else {
            self.red("✗ missing access_token")
        };
        let provider = if account.provider.is_empty() {
            "−"
        } else {
            &account.provider
        };

        format!("{:<40} {provider:<16} {status}", account.id)
    }

    /// Formats an error message.
    pub fn format_error(&self, subject: &str, error: &str) -> String {
        format!("{}: {} - {error}", self.bold(subject), self.red("Error"))
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn format_number(&self, n: f64) -> String {
        if n >= 1_000_000.0 {
            format!("{:.1}M", n / 1_000_000.0)
        } else if n >= 1_000.0 {
            format!("{:.1}K", n / 1_000.0)
        } else {
            format!("{n:.0}")
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Short description of a reasoning capability.
pub fn format_reasoning(reasoning: &ReasoningSupport) -> String {
    match reasoning {
        ReasoningSupport::Budget { min, max, .. } => format!("budget {min}-{max}"),
        ReasoningSupport::Levels { levels } => {
            let names: Vec<String> = levels.iter().map(ToString::to_string).collect();
            format!("levels {}", names.join("/"))
        }
    }
}

/// Quantities keep up to two decimals and drop trailing zeros.
fn format_quantity(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_number(500.0), "500");
        assert_eq!(formatter.format_number(16_384.0), "16.4K");
        assert_eq!(formatter.format_number(1_048_576.0), "1.0M");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(12.5), "12.5");
        assert_eq!(format_quantity(50.0), "50");
        assert_eq!(format_quantity(0.126), "0.13");
    }

    #[test]
    fn test_color_for_percent() {
        let formatter = TextFormatter::new(true);
        assert!(formatter.color_for_percent(15.0, "test").contains(RED));
        assert!(formatter.color_for_percent(35.0, "test").contains(YELLOW));
        assert!(formatter.color_for_percent(75.0, "test").contains(GREEN));
    }

    #[test]
    fn test_format_reset_past_is_now() {
        let formatter = TextFormatter::new(false);
        let past = Utc::now() - Duration::minutes(5);
        assert_eq!(formatter.format_reset_time(past), "now");
    }

    #[test]
    fn test_format_reset_countdown() {
        let formatter = TextFormatter::new(false);
        let soon = Utc::now() + Duration::minutes(30) + Duration::seconds(20);
        assert_eq!(formatter.format_reset_time(soon), "in 30 minutes");
    }
}
