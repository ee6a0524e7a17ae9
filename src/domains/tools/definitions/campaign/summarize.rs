//! Campaign log summarization tool.
//!
//! Feeds the most recent log entries through the text generation backend to
//! produce a player-facing narrative recap.

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
use crate::domains::store::{CampaignLogEntry, JsonStore};

use super::super::common::{error_result, success_result};
use super::RECENT_LOG_COUNT;

/// Parameters for the summarization tool (none).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CampaignLogSummarizeParams {}

/// Campaign log summarization tool.
pub struct CampaignLogSummarizeTool;

impl CampaignLogSummarizeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "campaign_log_summarize";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a narrative summary of the most recent campaign log entries, suitable for recapping the story to players.";

    /// Execute the tool logic.
    pub async fn execute(
        campaign_logs: &JsonStore<CampaignLogEntry>,
        generation: &GenerationClient,
    ) -> CallToolResult {
        let recent = match campaign_logs.tail(RECENT_LOG_COUNT).await {
            Ok(recent) => recent,
            Err(e) => return error_result(&format!("Failed to read campaign logs: {}", e)),
        };

        if recent.is_empty() {
            return success_result("No campaign logs found.".to_string());
        }

        info!("Summarizing {} campaign log entries", recent.len());

        let prompt = build_summary_prompt(&recent);
        match generation.generate_text(&prompt).await {
            Ok(summary) => success_result(format!(
                "Summary of the last {} campaign logs:\n\n{}",
                recent.len(),
                summary
            )),
            Err(e) => error_result(&format!("Failed to generate log summary: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CampaignLogSummarizeParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(
        campaign_logs: Arc<JsonStore<CampaignLogEntry>>,
        generation: Arc<GenerationClient>,
    ) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let campaign_logs = campaign_logs.clone();
            let generation = generation.clone();
            async move { Ok(Self::execute(&campaign_logs, &generation).await) }.boxed()
        })
    }
}

/// Assemble the recap prompt from the recent entries.
fn build_summary_prompt(entries: &[CampaignLogEntry]) -> String {
    let rendered = entries
        .iter()
        .map(CampaignLogEntry::display_text)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Generate a summary of the last {count} campaign logs:\n\n{rendered}\n\n\
         Provide a concise overview of the key events and themes in these logs. \
         Write a cohesive, third-person narrative summary of the last {count} TTRPG campaign \
         sessions. Blend the events from each log into a single flowing story, maintaining a \
         fantasy-adventure tone. Highlight character actions, important dialogue or moments \
         (even if invented to enrich the summary), and build tension where appropriate. Focus \
         on immersive storytelling rather than exposition or analysis. The summary should be \
         engaging and suitable for sharing with players to recap the recent campaign events. \
         Aim for a length of around 100 words.",
        count = entries.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rmcp::model::RawContent;
    use tempfile::TempDir;

    #[test]
    fn test_summary_prompt_embeds_entries() {
        let entries = vec![
            CampaignLogEntry::new("Ambush", "Goblins on the road.", Utc::now()),
            CampaignLogEntry::new("Aftermath", "The party regrouped.", Utc::now()),
        ];
        let prompt = build_summary_prompt(&entries);
        assert!(prompt.contains("the last 2 campaign logs"));
        assert!(prompt.contains("Title: Ambush"));
        assert!(prompt.contains("Title: Aftermath"));
        assert!(prompt.contains("fantasy-adventure tone"));
    }

    #[tokio::test]
    async fn test_empty_store_short_circuits_generation() {
        let dir = TempDir::new().unwrap();
        let store: JsonStore<CampaignLogEntry> =
            JsonStore::new(dir.path().join("campaign_logs.json"));
        // no API key configured: generation would fail if it were reached
        let generation =
            GenerationClient::new(crate::core::config::GenerationConfig::default());

        let result = CampaignLogSummarizeTool::execute(&store, &generation).await;
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "No campaign logs found.");
    }
}
