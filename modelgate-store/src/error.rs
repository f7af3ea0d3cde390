//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from configuration and credential storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The auth directory does not exist or is not a directory.
    #[error("Auth directory not found: {}", .0.display())]
    AuthDirNotFound(PathBuf),

    /// An auth file is not a JSON object.
    #[error("Invalid auth file {}: {reason}", path.display())]
    InvalidAuthFile {
        /// File path.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if this error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            StoreError::AuthDirNotFound(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let io = StoreError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(io.is_not_found());

        let denied = StoreError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!denied.is_not_found());

        assert!(StoreError::AuthDirNotFound(PathBuf::from("/nope")).is_not_found());
        assert!(!StoreError::Config("bad".into()).is_not_found());
    }

    #[test]
    fn test_auth_file_message() {
        let err = StoreError::InvalidAuthFile {
            path: PathBuf::from("auths/kiro-1.json"),
            reason: "expected a JSON object".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid auth file auths/kiro-1.json: expected a JSON object"
        );
    }
}
