//! Random user creation tool.
//!
//! Asks the generation backend for plausible fake user data and appends it
//! to the user store. The model is instructed to answer with bare JSON, but
//! replies often arrive wrapped in Markdown code fences, so those are
//! stripped before parsing.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::domains::generation::GenerationClient;
use crate::domains::store::{JsonStore, User};

use super::super::common::{error_result, success_result};

const FAKE_USER_PROMPT: &str = "Generate fake user data. The user should have a realistic name, email, address, and phone number. Return only a JSON object with the fields name, email, address, and phonenumber, and no other text or formatting.";

/// Parameters for the random user tool (none).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserCreateRandomParams {}

/// The fields expected back from the model.
#[derive(Debug, Deserialize)]
struct GeneratedUser {
    name: String,
    email: String,
    address: String,
    phonenumber: String,
}

/// Random user tool - creates a user with LLM-generated fake data.
pub struct UserCreateRandomTool;

impl UserCreateRandomTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "user_create_random";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a random user with realistic fake data (name, email, address, phone number).";

    /// Execute the tool logic.
    pub async fn execute(
        generation: &GenerationClient,
        users: &JsonStore<User>,
    ) -> CallToolResult {
        info!("Generating a random user");

        let reply = match generation.generate_text(FAKE_USER_PROMPT).await {
            Ok(reply) => reply,
            Err(e) => return error_result(&format!("Failed to generate user data: {}", e)),
        };

        let generated: GeneratedUser = match serde_json::from_str(strip_code_fences(&reply)) {
            Ok(generated) => generated,
            Err(e) => {
                return error_result(&format!("Generated user data was not valid JSON: {}", e));
            }
        };

        let user = User::new(
            generated.name,
            generated.email,
            generated.address,
            generated.phonenumber,
        );

        match users.append(user).await {
            Ok(id) => success_result(format!("User {} created successfully", id)),
            Err(e) => error_result(&format!("Failed to create user: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UserCreateRandomParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(
        generation: Arc<GenerationClient>,
        users: Arc<JsonStore<User>>,
    ) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let generation = generation.clone();
            let users = users.clone();
            async move { Ok(Self::execute(&generation, &users).await) }.boxed()
        })
    }
}

/// Strip a Markdown code fence (``` or ```json) wrapping the reply.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_plain() {
        assert_eq!(strip_code_fences(r#"{"name": "Ann"}"#), r#"{"name": "Ann"}"#);
    }

    #[test]
    fn test_strip_code_fences_json_fence() {
        let fenced = "```json\n{\"name\": \"Ann\"}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"name\": \"Ann\"}");
    }

    #[test]
    fn test_strip_code_fences_bare_fence() {
        let fenced = "```\n{\"name\": \"Ann\"}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"name\": \"Ann\"}");
    }

    #[test]
    fn test_generated_user_parses() {
        let json = r#"{
            "name": "Mira Voss",
            "email": "mira@example.com",
            "address": "7 Lantern Way",
            "phonenumber": "555-0199"
        }"#;
        let user: GeneratedUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Mira Voss");
    }
}
