//! Prompt-specific error types.

use thiserror::Error;

/// Errors that can occur during prompt operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The requested prompt was not found.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// Required argument is missing.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// The log store backing a dynamic prompt could not be read.
    #[error("Store error: {0}")]
    Store(#[from] crate::domains::store::StoreError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PromptError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "missing argument" error.
    pub fn missing_argument(arg: impl Into<String>) -> Self {
        Self::MissingArgument(arg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
