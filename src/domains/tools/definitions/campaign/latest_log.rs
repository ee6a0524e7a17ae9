//! Latest campaign log tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::domains::store::{CampaignLogEntry, JsonStore};

use super::super::common::{error_result, success_result};

/// Parameters for the latest-log tool (none).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CampaignLogLatestParams {}

/// Latest campaign log tool - fetches the most recent entry.
pub struct CampaignLogLatestTool;

impl CampaignLogLatestTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "campaign_log_latest";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieve the most recent campaign log entry.";

    /// Execute the tool logic.
    pub async fn execute(campaign_logs: &JsonStore<CampaignLogEntry>) -> CallToolResult {
        info!("Fetching the latest campaign log entry");

        match campaign_logs.last().await {
            Ok(Some(entry)) => success_result(format!(
                "Last campaign log entry:\n\n{}",
                entry.display_text()
            )),
            Ok(None) => success_result("No campaign logs found.".to_string()),
            Err(e) => error_result(&format!("Failed to read campaign logs: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CampaignLogLatestParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(campaign_logs: Arc<JsonStore<CampaignLogEntry>>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let campaign_logs = campaign_logs.clone();
            async move { Ok(Self::execute(&campaign_logs).await) }.boxed()
        })
    }
}
