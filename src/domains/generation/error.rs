//! Generation-specific error types.

use thiserror::Error;

/// Errors that can occur during text or image generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key is configured for the chat-completion backend.
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    /// The backend returned a non-2xx status.
    #[error("generation API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The completion response carried no text content.
    #[error("completion contained no text content")]
    EmptyCompletion,

    /// The configured image endpoint is not a valid base URL.
    #[error("invalid image endpoint URL: {0}")]
    InvalidBaseUrl(String),
}
