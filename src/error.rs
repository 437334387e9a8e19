//! Error types for sitewise-tools

use std::time::Duration;
use thiserror::Error;

/// Main error type for sitewise-tools
#[derive(Error, Debug)]
pub enum SiteWiseError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Execution timeout reached: {elapsed:?} elapsed, limit is {limit:?}")]
    Timeout { elapsed: Duration, limit: Duration },

    #[error("Cycle detected along traversal path: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("API call {operation} failed: {message}")]
    Api { operation: String, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl SiteWiseError {
    /// Build an API error for the named operation
    pub fn api(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for sitewise-tools operations
pub type Result<T> = std::result::Result<T, SiteWiseError>;
