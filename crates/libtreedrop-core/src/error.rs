use thiserror::Error;

/// Main error type for treedrop operations
#[derive(Debug, Error)]
pub enum TreedropError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("ingestion failed: {0}")]
    IngestionFailed(String),

    #[error("backend error: {0}")]
    Backend(#[from] crate::backend::BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl TreedropError {
    /// Get the error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            TreedropError::InvalidArgs(_) => "invalid_args",
            TreedropError::NotFound(_) => "not_found",
            TreedropError::IngestionFailed(_) => "ingestion_failed",
            TreedropError::Backend(_) => "backend_error",
            TreedropError::Io(_) => "io_error",
            TreedropError::Json(_) => "internal_error",
            TreedropError::TomlParse(_) => "invalid_config",
            TreedropError::TomlSerialize(_) => "internal_error",
            TreedropError::Pattern(_) => "invalid_config",
            TreedropError::Internal(_) => "internal_error",
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            TreedropError::InvalidArgs(_) => 2,
            TreedropError::NotFound(_) => 3,
            TreedropError::IngestionFailed(_) => 4,
            TreedropError::Backend(_) => 6,
            TreedropError::Io(_) => 5,
            TreedropError::TomlParse(_) => 2,
            TreedropError::Pattern(_) => 2,
            _ => 1,
        }
    }

    /// Get actionable suggestions for fixing the error
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            TreedropError::NotFound(msg) => {
                if msg.contains("node") {
                    vec!["Run 'treedrop list <PATHS>' to see the paths of ingested files"]
                } else {
                    vec![]
                }
            }
            TreedropError::IngestionFailed(_) => vec![
                "Check that every dropped path exists and is readable",
            ],
            TreedropError::Backend(_) => vec![
                "Check that the backend is running at the configured base_url",
                "Run 'treedrop config show' to see the effective configuration",
            ],
            TreedropError::TomlParse(_) | TreedropError::Pattern(_) => vec![
                "Fix treedrop.toml or regenerate it with 'treedrop config init --force'",
            ],
            _ => vec![],
        }
    }

    /// Create a NotFound error for a tree node path
    pub fn node_not_found(path: &str) -> Self {
        TreedropError::NotFound(format!("No file node at path '{}'", path))
    }
}

/// Failure of a single host call while walking a drop.
///
/// Never escapes the tree builder: enumeration failures become empty
/// directories and materialization failures drop the leaf.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("entry unreadable: {0}")]
    Unreadable(String),

    #[error("entry is not a {expected}: {path}")]
    WrongKind { expected: &'static str, path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_exit_codes() {
        let err = TreedropError::node_not_found("/docs/a.txt");
        assert_eq!(err.error_code(), "not_found");
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("/docs/a.txt"));
        assert!(!err.suggestions().is_empty());

        let err = TreedropError::IngestionFailed("boom".to_string());
        assert_eq!(err.error_code(), "ingestion_failed");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_internal_has_no_suggestions() {
        let err = TreedropError::Internal("x".to_string());
        assert_eq!(err.exit_code(), 1);
        assert!(err.suggestions().is_empty());
    }
}
