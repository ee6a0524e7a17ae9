//! Spotify playback tool.

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

use crate::domains::spotify::{PlaybackOffset, PlaybackRequest, SpotifyClient};

use super::super::common::{error_result, success_result};

/// Parameters for the playback tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpotifyPlayParams {
    /// Context to play: an album, artist, or playlist URI.
    #[schemars(description = "Context URI (album, artist, or playlist) to play")]
    pub context_uri: Option<String>,

    /// Explicit track URIs to play.
    #[schemars(description = "Track URIs to play")]
    pub uris: Option<Vec<String>>,

    /// Where in the context to start.
    #[schemars(description = "Start offset within the context")]
    pub offset: Option<PlaybackOffset>,

    /// Position within the first item, in milliseconds.
    #[schemars(description = "Position within the first item, in milliseconds")]
    pub position_ms: Option<u64>,

    /// Target device; the active device when omitted.
    #[schemars(description = "Device id to play on (default: the active device)")]
    pub device_id: Option<String>,
}

/// Spotify play tool - starts playback of a track or context.
pub struct SpotifyPlayTool;

impl SpotifyPlayTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spotify_play";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Play a track in Spotify by its URI, or an artist/album/playlist by its context URI, on the user's active device.";

    /// Execute the tool logic.
    pub async fn execute(params: &SpotifyPlayParams, spotify: &SpotifyClient) -> CallToolResult {
        if params.uris.is_none() && params.context_uri.is_none() {
            return error_result("Either \"uris\" or \"context_uri\" must be provided.");
        }

        info!(
            "Starting playback (context: {:?}, uris: {:?})",
            params.context_uri,
            params.uris.as_ref().map(Vec::len)
        );

        let request = PlaybackRequest {
            context_uri: params.context_uri.clone(),
            uris: params.uris.clone(),
            offset: params.offset.clone(),
            position_ms: params.position_ms,
        };

        match spotify
            .start_playback(&request, params.device_id.as_deref())
            .await
        {
            Ok(()) => success_result("Playing!".to_string()),
            Err(e) => error_result(&format!("Failed to start playback: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpotifyPlayParams>(),
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
                let params: SpotifyPlayParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &spotify).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SpotifyConfig;

    #[tokio::test]
    async fn test_play_requires_target() {
        let spotify = SpotifyClient::new(SpotifyConfig::default());
        let params = SpotifyPlayParams {
            context_uri: None,
            uris: None,
            offset: None,
            position_ms: None,
            device_id: None,
        };

        let result = SpotifyPlayTool::execute(&params, &spotify).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_params_accept_uri_list() {
        let json = r#"{"uris": ["spotify:track:abc"], "position_ms": 1500}"#;
        let params: SpotifyPlayParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.uris.unwrap().len(), 1);
        assert_eq!(params.position_ms, Some(1500));
    }
}
