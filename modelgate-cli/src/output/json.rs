//! JSON output formatting.

use anyhow::Result;
use modelgate_core::{ModelDescriptor, UsageSnapshot};
use modelgate_providers::QuotaError;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// One channel and its model count.
#[derive(Debug, Serialize)]
pub struct ChannelOutput {
    pub channel: &'static str,
    pub models: usize,
}

/// Result of a global lookup.
#[derive(Debug, Serialize)]
pub struct LookupOutput<'a> {
    pub channel: &'static str,
    pub model: &'a ModelDescriptor,
}

/// Error payload.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub error: String,
    pub kind: &'static str,
}

impl ErrorOutput {
    /// Builds the payload for a quota failure.
    pub fn from_quota(err: &QuotaError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// Quota result for one account.
#[derive(Debug, Serialize)]
pub struct QuotaOutput<'a> {
    pub account: &'a str,
    #[serde(flatten)]
    pub usage: Option<&'a UsageSnapshot>,
    #[serde(flatten)]
    pub error: Option<ErrorOutput>,
}

impl<'a> QuotaOutput<'a> {
    /// Builds the output for one resolution.
    pub fn new(account: &'a str, result: &'a Result<UsageSnapshot, QuotaError>) -> Self {
        match result {
            Ok(snapshot) => Self {
                account,
                usage: Some(snapshot),
                error: None,
            },
            Err(e) => Self {
                account,
                usage: None,
                error: Some(ErrorOutput::from_quota(e)),
            },
        }
    }
}

/// A stored account.
#[derive(Debug, Serialize)]
pub struct AccountOutput {
    pub id: String,
    #[serde(rename = "type")]
    pub provider: String,
    pub supported: bool,
    pub has_token: bool,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats quota results; a single account is printed as an object.
    pub fn format_quota(&self, outputs: &[QuotaOutput<'_>]) -> Result<String> {
        match outputs {
            [single] => self.format(single),
            many => self.format(many),
        }
    }
}
