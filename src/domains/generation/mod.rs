//! LLM generation domain.
//!
//! Wraps the two generation backends the assistant uses: a chat-completion
//! API for narrative text (log summaries, fake user data) and an image
//! service addressed purely through URL construction.

mod client;
mod error;

pub use client::{GenerationClient, ImageOptions};
pub use error::GenerationError;
