//! Output formatting for CLI.

mod json;
mod text;

pub use json::{
    AccountOutput, ChannelOutput, ErrorOutput, JsonFormatter, LookupOutput, QuotaOutput,
};
pub use text::TextFormatter;
