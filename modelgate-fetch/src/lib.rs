// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # modelgate Fetch
//!
//! Outbound HTTP plumbing for the usage adapters.
//!
//! ## Host APIs
//!
//! - [`host::http::HttpTransport`] - Trait every outbound call goes through
//! - [`host::http::HttpClient`] - reqwest implementation with tracing and a domain allowlist
//!
//! ## Fetch Context
//!
//! [`context::FetchContext`] bundles the transport with a per-call timeout,
//! an optional overall deadline, and a cancellation token. Adapters call
//! [`FetchContext::send`] and never touch the transport directly.
//!
//! ## Example
//!
//! ```ignore
//! use modelgate_fetch::{FetchContext, HttpRequest};
//!
//! let ctx = FetchContext::builder().build()?;
//! let scoped = ctx.child();
//! let response = scoped.send(HttpRequest::get("https://api.github.com/copilot_internal/user")).await?;
//! ```

pub mod context;
pub mod error;
pub mod host;

pub use context::{DEFAULT_TIMEOUT, FetchContext, FetchContextBuilder, FetchSettings};
pub use error::FetchError;
pub use host::http::{HttpClient, HttpRequest, HttpResponse, HttpTransport};

// Re-exported so callers can cancel without depending on tokio-util directly.
pub use tokio_util::sync::CancellationToken;
