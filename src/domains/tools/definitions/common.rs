//! Common helpers shared across tool definitions.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a success result with a text summary plus structured content.
///
/// Falls back to text-only if the data cannot be serialized.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize structured content: {}", e);
            CallToolResult::success(vec![Content::text(summary)])
        }
    }
}
