// Debug toolbar error types

use thiserror::Error;

/// Errors raised while building, storing, or formatting a toolbar snapshot
#[derive(Error, Debug)]
pub enum ToolbarError {
    /// No snapshot is stored under the requested id
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    /// A response format outside html/json/xml was requested
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A configured collector could not be constructed
    #[error("Collector could not be resolved: {0}")]
    CollectorResolution(String),

    /// Snapshot (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The templating collaborator failed
    #[error("Template error: {0}")]
    Template(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolbarError {
    /// Returns true when the error means "nothing stored under this id"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ToolbarError::SnapshotNotFound(_))
    }
}

/// Result type for toolbar operations
pub type Result<T> = std::result::Result<T, ToolbarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolbarError::SnapshotNotFound("debugbar_42".to_string());
        assert_eq!(err.to_string(), "Snapshot not found: debugbar_42");

        let err = ToolbarError::UnsupportedFormat("text/plain".to_string());
        assert_eq!(err.to_string(), "Unsupported format: text/plain");

        let err = ToolbarError::Template("missing helper".to_string());
        assert_eq!(err.to_string(), "Template error: missing helper");
    }

    #[test]
    fn test_is_not_found() {
        assert!(ToolbarError::SnapshotNotFound("x".into()).is_not_found());
        assert!(!ToolbarError::Template("x".into()).is_not_found());
    }

    #[test]
    fn test_from_serde_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ToolbarError = parse.into();
        assert!(matches!(err, ToolbarError::Serialization(_)));
    }
}
