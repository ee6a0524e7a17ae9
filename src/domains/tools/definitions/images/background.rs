//! Background image generation tool.

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

use crate::domains::generation::{GenerationClient, ImageOptions};

use super::super::common::{error_result, success_result};

const BASE_PROMPT: &str = "Generate a background image for a fantasy tabletop role-playing game campaign. The image should be atmospheric, with rich details and dramatic lighting, suitable for a TTRPG setting.";

/// Parameters for the background image tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BackgroundImageParams {
    /// Optional scene description folded into the base prompt.
    #[schemars(description = "Scene description, e.g. \"a ruined keep under a blood moon\"")]
    pub description: Option<String>,
}

/// Background image tool - produces a campaign backdrop image URL.
pub struct BackgroundImageTool;

impl BackgroundImageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "image_background";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a background image for a campaign scene based on an optional description. Returns the image URL.";

    /// Execute the tool logic.
    pub fn execute(params: &BackgroundImageParams, generation: &GenerationClient) -> CallToolResult {
        let prompt = build_background_prompt(params.description.as_deref());
        info!("Generating background image");

        match generation.image_url(&prompt, &ImageOptions::default()) {
            Ok(url) => success_result(format!("Background image created successfully: {}", url)),
            Err(e) => error_result(&format!("Failed to create background image: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<BackgroundImageParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(generation: Arc<GenerationClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let generation = generation.clone();
            async move {
                let params: BackgroundImageParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &generation))
            }
            .boxed()
        })
    }
}

/// Fold an optional description into the base prompt.
fn build_background_prompt(description: Option<&str>) -> String {
    match description {
        Some(description) => format!("{BASE_PROMPT} {description}"),
        None => BASE_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GenerationConfig;
    use rmcp::model::RawContent;

    #[test]
    fn test_prompt_without_description() {
        let prompt = build_background_prompt(None);
        assert_eq!(prompt, BASE_PROMPT);
    }

    #[test]
    fn test_prompt_appends_description() {
        let prompt = build_background_prompt(Some("a ruined keep under a blood moon"));
        assert!(prompt.starts_with(BASE_PROMPT));
        assert!(prompt.ends_with("a ruined keep under a blood moon"));
    }

    #[test]
    fn test_execute_returns_image_url() {
        let generation = GenerationClient::new(GenerationConfig::default());
        let params = BackgroundImageParams {
            description: Some("misty marshland".to_string()),
        };

        let result = BackgroundImageTool::execute(&params, &generation);
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains("https://image.pollinations.ai/prompt/"));
        assert!(text.contains("misty%20marshland"));
    }
}
