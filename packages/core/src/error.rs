//! Error Types
//!
//! Absence (missing node, missing property, failed conversion, exhausted
//! ancestor walk) is never an error in this crate. The types here cover the
//! few conditions that are: a path that cannot be decomposed, a caller bug
//! that the type system does not already rule out, and configuration
//! loading failures.

use thiserror::Error;

/// Crate-level error
#[derive(Error, Debug)]
pub enum TreeError {
    /// Raw path could not be decomposed into path/selectors/extension/suffix
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    /// Argument violates an API precondition (caller bug, not missing content)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TreeError {
    /// Create a malformed path error
    pub fn malformed_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path_display() {
        let err = TreeError::malformed_path("", "path is empty");
        assert_eq!(err.to_string(), "Malformed path '': path is empty");
    }

    #[test]
    fn test_config_error_converts_into_tree_error() {
        let err: TreeError = ConfigError::invalid("content_root_name cannot be empty").into();
        assert!(matches!(err, TreeError::Config(ConfigError::Invalid(_))));
        assert!(err.to_string().contains("content_root_name"));
    }
}
