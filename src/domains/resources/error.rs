//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource URI is invalid.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// The backing store could not be read.
    #[error("Store error: {0}")]
    Store(#[from] crate::domains::store::StoreError),

    /// JSON serialization failed while rendering the resource.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "invalid URI" error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
