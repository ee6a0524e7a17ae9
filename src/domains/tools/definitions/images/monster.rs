//! Monster lookup and image generation tool.
//!
//! Fetches monster data from the open D&D 5e API (no authentication) and
//! folds the stat block into an image generation prompt.

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

use super::super::common::{error_result, structured_result};

const DND5E_API_BASE: &str = "https://www.dnd5eapi.co";

/// Atmosphere of the generated monster image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MonsterImageStyle {
    Realistic,
    #[default]
    FantasyArt,
    Dark,
    Heroic,
}

/// Parameters for the monster image tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MonsterImageParams {
    /// API index of the monster, e.g. "adult-black-dragon".
    #[schemars(description = "D&D 5e API monster index, e.g. \"adult-black-dragon\"")]
    pub monster_index: String,

    /// Image atmosphere (default: fantasy-art).
    #[serde(default)]
    #[schemars(
        description = "Image style: realistic, fantasy-art, dark, or heroic (default: fantasy-art)"
    )]
    pub image_style: MonsterImageStyle,
}

/// Monster data as returned by the D&D 5e API (the fields this tool uses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterData {
    pub index: String,
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub alignment: String,
    #[serde(default)]
    pub armor_class: Vec<ArmorClass>,
    pub hit_points: u32,
    pub challenge_rating: f64,
    #[serde(default)]
    pub special_abilities: Vec<MonsterAbility>,
    #[serde(default)]
    pub actions: Vec<MonsterAbility>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorClass {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterAbility {
    pub name: String,
    pub desc: String,
}

/// Structured output for the monster image tool.
#[derive(Debug, Serialize)]
pub struct MonsterImageResult {
    pub monster: MonsterData,
    pub image_url: String,
}

/// Monster image tool - looks up a monster and generates a matching image.
pub struct MonsterImageTool;

impl MonsterImageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "monster_image";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch monster data from the D&D 5e API and generate an image based on the monster's description. Returns the stat summary and the image URL.";

    /// Execute the tool logic.
    pub async fn execute(
        params: &MonsterImageParams,
        http: &reqwest::Client,
        generation: &GenerationClient,
    ) -> CallToolResult {
        Self::execute_against(params, http, generation, DND5E_API_BASE).await
    }

    /// Execute against a specific API base (used by tests).
    async fn execute_against(
        params: &MonsterImageParams,
        http: &reqwest::Client,
        generation: &GenerationClient,
        api_base: &str,
    ) -> CallToolResult {
        info!("Fetching monster data for: {}", params.monster_index);

        let monster = match fetch_monster(http, api_base, &params.monster_index).await {
            Ok(monster) => monster,
            Err(e) => return error_result(&format!("Failed to fetch monster data: {}", e)),
        };

        let prompt = build_monster_prompt(&monster, params.image_style);
        let image_url = match generation.image_url(&prompt, &ImageOptions::default()) {
            Ok(url) => url,
            Err(e) => return error_result(&format!("Failed to create monster image: {}", e)),
        };

        let summary = format!(
            "{} ({} {}, {}) - AC {}, HP {}, CR {}\n\nImage: {}",
            monster.name,
            monster.size,
            monster.kind,
            monster.alignment,
            monster
                .armor_class
                .first()
                .map(|ac| ac.value.to_string())
                .unwrap_or_else(|| "?".to_string()),
            monster.hit_points,
            monster.challenge_rating,
            image_url
        );

        structured_result(summary, &MonsterImageResult { monster, image_url })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MonsterImageParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(
        http: reqwest::Client,
        generation: Arc<GenerationClient>,
    ) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let http = http.clone();
            let generation = generation.clone();
            async move {
                let params: MonsterImageParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &http, &generation).await)
            }
            .boxed()
        })
    }
}

/// Fetch one monster record from the API.
async fn fetch_monster(
    http: &reqwest::Client,
    api_base: &str,
    index: &str,
) -> Result<MonsterData, String> {
    let url = format!("{api_base}/api/monsters/{index}");
    let response = http.get(&url).send().await.map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("monster API returned HTTP {}", status.as_u16()));
    }

    response.json::<MonsterData>().await.map_err(|e| e.to_string())
}

/// Fold the stat block into an image prompt.
fn build_monster_prompt(monster: &MonsterData, style: MonsterImageStyle) -> String {
    let style_prompt = match style {
        MonsterImageStyle::Realistic => "Use realistic, lifelike art style with detailed textures.",
        MonsterImageStyle::FantasyArt => {
            "Use fantasy art style with dramatic lighting and magical atmosphere."
        }
        MonsterImageStyle::Dark => "Use a dark, menacing art style with deep shadows.",
        MonsterImageStyle::Heroic => {
            "Use a heroic art style, depicting the creature as a worthy adversary."
        }
    };

    let mut prompt = format!(
        "Generate a detailed image of a {}, a {} {} from Dungeons and Dragons, {} alignment.",
        monster.name,
        monster.size.to_lowercase(),
        monster.kind,
        monster.alignment
    );

    if let Some(ability) = monster.special_abilities.first() {
        prompt.push_str(&format!(" Notable trait: {}: {}", ability.name, ability.desc));
    }

    prompt.push(' ');
    prompt.push_str(style_prompt);
    prompt
}
