//! TTRPG Campaign Assistant MCP Server
//!
//! This crate provides a Model Context Protocol (MCP) server that acts as a
//! tabletop role-playing campaign assistant: it tracks users and campaign
//! logs in JSON file stores, searches and controls Spotify playback for
//! ambiance, and generates images and narrative summaries through an LLM
//! backend.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **store**: JSON-array file stores with auto-incrementing record ids
//!   - **spotify**: Spotify Web API client with one-shot token refresh
//!   - **generation**: LLM text and image generation wrapper
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: Data resources that can be read by clients
//!   - **prompts**: Prompt templates for consistent interactions
//!
//! # Example
//!
//! ```rust,no_run
//! use campaign_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     server.run_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
