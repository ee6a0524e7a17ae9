//! User creation tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::domains::store::{JsonStore, User};

use super::super::common::{error_result, success_result};

/// Parameters for the user creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserCreateParams {
    #[schemars(description = "Full name of the user")]
    pub name: String,

    #[schemars(description = "Email address")]
    pub email: String,

    #[schemars(description = "Postal address")]
    pub address: String,

    #[schemars(description = "Phone number")]
    pub phonenumber: String,
}

/// User creation tool - appends a user record to the store.
pub struct UserCreateTool;

impl UserCreateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "user_create";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a new user in the system with the provided name, email, address, and phone number.";

    /// Execute the tool logic.
    pub async fn execute(params: &UserCreateParams, users: &JsonStore<User>) -> CallToolResult {
        info!("Creating user: {}", params.name);

        let user = User::new(
            params.name.clone(),
            params.email.clone(),
            params.address.clone(),
            params.phonenumber.clone(),
        );

        match users.append(user).await {
            Ok(id) => success_result(format!("User created successfully with ID: {}", id)),
            Err(e) => error_result(&format!("Failed to create user: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UserCreateParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(users: Arc<JsonStore<User>>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let users = users.clone();
            async move {
                let params: UserCreateParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &users).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use tempfile::TempDir;

    fn params() -> UserCreateParams {
        UserCreateParams {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            address: "1 Main St".to_string(),
            phonenumber: "555-0100".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_assigns_first_id() {
        let dir = TempDir::new().unwrap();
        let users = JsonStore::new(dir.path().join("users.json"));

        let result = UserCreateTool::execute(&params(), &users).await;
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains("ID: 1"));

        let stored = users.read_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Ann");
    }

    #[tokio::test]
    async fn test_create_user_write_failure_is_reported() {
        // a directory path cannot be written as a file
        let dir = TempDir::new().unwrap();
        let users: JsonStore<User> = JsonStore::new(dir.path());

        let result = UserCreateTool::execute(&params(), &users).await;
        assert!(result.is_error.unwrap_or(false));
    }
}
