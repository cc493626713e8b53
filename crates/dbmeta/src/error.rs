//! Error types for the introspection library.

use thiserror::Error;

/// Main error type for introspection operations.
#[derive(Error, Debug)]
pub enum MetaError {
    /// No session was supplied to the introspection call.
    #[error("No database session supplied")]
    NoSession,

    /// The session's product identity is not one of the registered dialects.
    #[error("Unsupported database type: '{0}'. Supported types: mysql, postgres")]
    UnsupportedDialect(String),

    /// A provider does not implement the requested operation at all.
    #[error("{operation} is not supported for {dialect}")]
    Unsupported {
        dialect: &'static str,
        operation: &'static str,
    },

    /// Catalog query execution or row scan failed
    #[error("Query failed: {message}\n  Context: {context}")]
    Query { message: String, context: String },

    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection pool error with context
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// MySQL driver error
    #[error("MySQL error: {0}")]
    Mysql(#[from] sqlx::Error),

    /// PostgreSQL driver error
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

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

impl MetaError {
    /// Create a Query error with context about which query failed.
    pub fn query(message: impl ToString, context: impl Into<String>) -> Self {
        MetaError::Query {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create a Pool error with context about where it occurred
    pub fn pool(message: impl ToString, context: impl Into<String>) -> Self {
        MetaError::Pool {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create an Unsupported error for a provider capability gap.
    pub fn unsupported(dialect: &'static str, operation: &'static str) -> Self {
        MetaError::Unsupported { dialect, operation }
    }

    /// True when the error marks a permanent capability gap rather than a
    /// failed query.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, MetaError::Unsupported { .. })
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            MetaError::Config(_) | MetaError::Yaml(_) | MetaError::UnsupportedDialect(_) => 2,
            MetaError::Pool { .. } => 3,
            MetaError::Query { .. } | MetaError::Mysql(_) | MetaError::Postgres(_) => 4,
            _ => 1,
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

/// Result type alias for introspection operations.
pub type Result<T> = std::result::Result<T, MetaError>;
