//! GitHub Copilot usage adapter.
//!
//! A single authenticated `GET` against the internal user endpoint the
//! Copilot Chat extension uses. The endpoint checks the client headers, so
//! the adapter sends the same editor identification strings the extension
//! does.
//!
//! The response carries one quota snapshot per category (chat,
//! completions, premium interactions); all of them are kept in the
//! normalized snapshot's categories.

mod api;
mod fetcher;
pub(crate) mod parser;

pub use api::{COPILOT_API_BASE, CopilotApiClient, USER_ENDPOINT};
pub use fetcher::CopilotUsageAdapter;
pub use parser::{CopilotUsageResponse, QuotaDetail, QuotaSnapshots};
