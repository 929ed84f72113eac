//! Error types for catalog reflection and DDL execution.

use thiserror::Error;

/// Exit code for configuration errors (invalid YAML, missing fields, etc.)
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Exit code for statement preparation or execution failures.
pub const EXIT_QUERY_ERROR: u8 = 2;

/// Exit code for a table lookup that found nothing.
pub const EXIT_NOT_FOUND: u8 = 4;

/// Exit code for file system and serialization errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A statement failed to prepare or execute, or row iteration failed
    #[error("Query failed: {message}\n  Context: {context}")]
    Query { message: String, context: String },

    /// Driver-level error without additional context
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a Query error with context about where it occurred
    pub fn query(message: impl ToString, context: impl Into<String>) -> Self {
        CatalogError::Query {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CatalogError::Config(_) | CatalogError::Yaml(_) => EXIT_CONFIG_ERROR,
            CatalogError::Query { .. } | CatalogError::Database(_) => EXIT_QUERY_ERROR,
            CatalogError::Io(_) | CatalogError::Json(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
