//! Error types for workflow-sql.
//!
//! Every failure of the export pipeline is represented by `ExportError`.
//! Nothing inside the pipeline catches or retries these; they surface to
//! the caller as-is.

use thiserror::Error;

/// Unified error type for all export operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// File missing, unreadable or unwritable.
    #[error("{0}")]
    Io(String),

    /// Malformed JSON, or a workflow field with the wrong JSON type.
    #[error("{0}")]
    Parse(String),

    /// Configuration file could not be read or parsed.
    #[error("{0}")]
    Config(String),

    /// A field could not be serialized into its SQL text form.
    #[error("{0}")]
    Render(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(error: serde_json::Error) -> Self {
        ExportError::Parse(error.to_string())
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(error: toml::de::Error) -> Self {
        ExportError::Config(error.to_string())
    }
}
