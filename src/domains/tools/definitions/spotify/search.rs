//! Spotify track search tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::domains::spotify::{SearchParams, SpotifyClient, TrackSummary};

use super::super::common::{error_result, structured_result};

/// Structured output for a track search.
#[derive(Debug, Serialize)]
pub struct SearchToolResult {
    pub tracks: Vec<TrackSummary>,
    pub total_count: usize,
    pub query: String,
}

/// Spotify search tool - finds tracks by title, artist, or free text.
pub struct SpotifySearchTool;

impl SpotifySearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spotify_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for tracks in Spotify by title, artist, or free-text description. Useful for finding ambiance music for a scene, e.g. \"dark tense music\". Returns track names, artists, albums, and URIs usable with the playback tool.";

    /// Execute the tool logic.
    pub async fn execute(params: &SearchParams, spotify: &SpotifyClient) -> CallToolResult {
        info!("Searching Spotify for: {}", params.q);

        match spotify.search(params).await {
            Ok(tracks) => {
                if tracks.is_empty() {
                    return error_result(&format!("No tracks found for query: {}", params.q));
                }
                let count = tracks.len();
                let summary = format!("Found {} track(s) matching '{}'", count, params.q);
                structured_result(
                    summary,
                    &SearchToolResult {
                        tracks,
                        total_count: count,
                        query: params.q.clone(),
                    },
                )
            }
            Err(e) => error_result(&format!("Spotify search failed: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(spotify: Arc<SpotifyClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let spotify = spotify.clone();
            async move {
                let params: SearchParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &spotify).await)
            }
            .boxed()
        })
    }
}
