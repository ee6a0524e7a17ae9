//! Error types and handling for the campaign assistant server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for campaign server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the campaign assistant server.
///
/// This enum captures all possible error conditions that can occur during
/// server operation, including domain-specific errors and external failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from a JSON record store.
    #[error("Store error: {0}")]
    Store(#[from] crate::domains::store::StoreError),

    /// Error originating from the Spotify client.
    #[error("Spotify error: {0}")]
    Spotify(#[from] crate::domains::spotify::SpotifyError),

    /// Error originating from the generation client.
    #[error("Generation error: {0}")]
    Generation(#[from] crate::domains::generation::GenerationError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport setup or shutdown errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
