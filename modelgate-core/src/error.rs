//! Core error types for modelgate.

use thiserror::Error;

/// Core error type for modelgate operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A snapshot carries figures outside their valid range.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
