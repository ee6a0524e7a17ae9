//! Resources domain module.
//!
//! This module exposes the record stores as readable MCP resources: the
//! full user list, the full campaign log, and a per-user profile template.
//!
//! ## Architecture
//!
//! - `registry.rs` - Resource and template metadata
//! - `service.rs` - Resource service resolving URIs against the stores
//! - `error.rs` - Resource-specific error types

mod error;
mod registry;
mod service;

pub use error::ResourceError;
pub use registry::{get_all_resource_templates, get_all_resources, resource_uris};
pub use service::ResourceService;
