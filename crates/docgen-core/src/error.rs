//! Error types for the DocGen engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire DocGen workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocgenError {
    /// A path did not resolve to any node in the document structure
    #[error("Path not found: '{path}'")]
    PathNotFound { path: String },

    /// A path resolved to a node that is not an array
    #[error("Path does not point to an array: '{path}'")]
    PathNotArray { path: String },

    /// Neither the live array nor the template knows the shape of a new item
    #[error("No known item shape for array '{path}'")]
    NoKnownShape { path: String },

    /// A document structure that is not a well-formed tree of objects, arrays and strings
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// Another submission is still being processed
    #[error("A request is already in progress")]
    Busy,

    /// An external collaborator (upload, message handling, generation) failed
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocgenError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a PathNotFound error
    pub fn path_not_found(path: impl ToString) -> Self {
        Self::PathNotFound {
            path: path.to_string(),
        }
    }

    /// Creates a PathNotArray error
    pub fn path_not_array(path: impl ToString) -> Self {
        Self::PathNotArray {
            path: path.to_string(),
        }
    }

    /// Creates a NoKnownShape error
    pub fn no_known_shape(path: impl ToString) -> Self {
        Self::NoKnownShape {
            path: path.to_string(),
        }
    }

    /// Creates an InvalidStructure error
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure(message.into())
    }

    /// Creates a Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a PathNotFound error
    pub fn is_path_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if this is a PathNotArray error
    pub fn is_path_not_array(&self) -> bool {
        matches!(self, Self::PathNotArray { .. })
    }

    /// Check if this is a NoKnownShape error
    pub fn is_no_known_shape(&self) -> bool {
        matches!(self, Self::NoKnownShape { .. })
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Whether the error points at a mismatch between renderer and editor paths.
    ///
    /// Such errors indicate a programming mistake rather than a user action and
    /// are logged at error level by callers.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::PathNotArray { .. } | Self::PathNotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DocgenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DocgenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DocgenError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DocgenError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error, used at collaborator boundaries
impl From<anyhow::Error> for DocgenError {
    fn from(err: anyhow::Error) -> Self {
        Self::Collaborator(err.to_string())
    }
}

/// A type alias for `Result<T, DocgenError>`.
pub type Result<T> = std::result::Result<T, DocgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_errors_are_contract_violations() {
        assert!(DocgenError::path_not_array("items").is_contract_violation());
        assert!(DocgenError::path_not_found("a.b").is_contract_violation());
        assert!(!DocgenError::no_known_shape("items").is_contract_violation());
        assert!(!DocgenError::Busy.is_contract_violation());
    }

    #[test]
    fn test_display_includes_path() {
        let err = DocgenError::no_known_shape("lineItems.0.taxes");
        assert_eq!(
            err.to_string(),
            "No known item shape for array 'lineItems.0.taxes'"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DocgenError = parse_err.into();
        match err {
            DocgenError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
