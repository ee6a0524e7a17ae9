//! Character image generation tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::domains::generation::{GenerationClient, ImageOptions};

use super::super::common::{error_result, success_result};

/// Framing of the generated character image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterStyle {
    #[default]
    Portrait,
    FullBody,
    Token,
}

/// Art direction for the generated character image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ArtStyle {
    Realistic,
    #[default]
    FantasyArt,
    Anime,
    Cartoon,
    Medieval,
}

/// Parameters for the character image tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CharacterImageParams {
    #[schemars(description = "Description of the character")]
    pub description: String,

    /// Image framing (default: portrait).
    #[serde(default)]
    #[schemars(description = "Framing: portrait, full-body, or token (default: portrait)")]
    pub style: CharacterStyle,

    /// Art direction (default: fantasy-art).
    #[serde(default)]
    #[schemars(
        description = "Art style: realistic, fantasy-art, anime, cartoon, or medieval (default: fantasy-art)"
    )]
    pub art_style: ArtStyle,
}

/// Character image tool - produces a character image URL.
pub struct CharacterImageTool;

impl CharacterImageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "image_character";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate a character image for a TTRPG campaign from a description, with a choice of framing and art style. Returns the image URL.";

    /// Execute the tool logic.
    pub fn execute(params: &CharacterImageParams, generation: &GenerationClient) -> CallToolResult {
        let prompt = build_character_prompt(params);
        info!("Generating character image ({:?})", params.style);

        match generation.image_url(&prompt, &ImageOptions::default()) {
            Ok(url) => success_result(format!("Character image created successfully: {}", url)),
            Err(e) => error_result(&format!("Failed to create character image: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CharacterImageParams>(),
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
                let params: CharacterImageParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &generation))
            }
            .boxed()
        })
    }
}

/// Assemble the full generation prompt from description, framing, and art
/// direction.
fn build_character_prompt(params: &CharacterImageParams) -> String {
    let style_prompt = match params.style {
        CharacterStyle::Portrait => "Show a portrait view from chest up with clear facial features.",
        CharacterStyle::FullBody => "Show the full character from head to toe in a standing pose.",
        CharacterStyle::Token => {
            "Create a character token suitable for use on a battle map, clear and recognizable."
        }
    };

    let art_style_prompt = match params.art_style {
        ArtStyle::Realistic => "Use realistic, lifelike art style with detailed textures.",
        ArtStyle::FantasyArt => "Use fantasy art style with dramatic lighting and magical atmosphere.",
        ArtStyle::Anime => "Use anime/manga art style with expressive features.",
        ArtStyle::Cartoon => "Use cartoon/stylized art style with simplified features.",
        ArtStyle::Medieval => {
            "Use medieval manuscript art style with rich colors and decorative elements."
        }
    };

    format!(
        "Generate a detailed character image for a fantasy tabletop role-playing game. {} {} {} \
         The image should be high quality, detailed, and suitable for use in a TTRPG campaign.",
        params.description, style_prompt, art_style_prompt
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let json = r#"{"description": "a grizzled dwarven ranger"}"#;
        let params: CharacterImageParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.style, CharacterStyle::Portrait);
        assert_eq!(params.art_style, ArtStyle::FantasyArt);
    }

    #[test]
    fn test_params_kebab_case_variants() {
        let json = r#"{"description": "x", "style": "full-body", "art_style": "fantasy-art"}"#;
        let params: CharacterImageParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.style, CharacterStyle::FullBody);
    }

    #[test]
    fn test_prompt_reflects_choices() {
        let params = CharacterImageParams {
            description: "a grizzled dwarven ranger".to_string(),
            style: CharacterStyle::Token,
            art_style: ArtStyle::Medieval,
        };
        let prompt = build_character_prompt(&params);
        assert!(prompt.contains("a grizzled dwarven ranger"));
        assert!(prompt.contains("battle map"));
        assert!(prompt.contains("medieval manuscript"));
    }
}
