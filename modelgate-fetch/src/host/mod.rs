//! Host APIs for talking to the outside world.
//!
//! - [`http`] - HTTP transport seam and the reqwest-backed client

pub mod http;

pub use http::{HttpClient, HttpRequest, HttpResponse, HttpTransport};
