//! Campaign log creation tool.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
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

use crate::domains::store::{CampaignLogEntry, JsonStore};

use super::super::common::{error_result, success_result};

/// Parameters for the campaign log creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CampaignLogCreateParams {
    #[schemars(description = "Title of the log entry")]
    pub title: String,

    #[schemars(description = "Narrative content of the log entry")]
    pub content: String,

    /// In-world session date; defaults to now.
    #[schemars(description = "Session date in ISO 8601 format (YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss)")]
    pub date: Option<String>,
}

/// Campaign log creation tool - appends a session entry to the log store.
pub struct CampaignLogCreateTool;

impl CampaignLogCreateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "campaign_log_create";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a new campaign log entry with a title, narrative content, and optional session date.";

    /// Execute the tool logic.
    pub async fn execute(
        params: &CampaignLogCreateParams,
        campaign_logs: &JsonStore<CampaignLogEntry>,
    ) -> CallToolResult {
        let date = match &params.date {
            Some(raw) => match parse_log_date(raw) {
                Some(date) => date,
                None => {
                    return error_result(
                        "Invalid date format. Please use ISO 8601 format (YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss)",
                    );
                }
            },
            None => Utc::now(),
        };

        info!("Creating campaign log entry: {}", params.title);

        let entry = CampaignLogEntry::new(params.title.clone(), params.content.clone(), date);
        match campaign_logs.append(entry).await {
            Ok(id) => success_result(format!(
                "Campaign log entry created successfully with ID: {} and title: \"{}\"",
                id, params.title
            )),
            Err(e) => error_result(&format!("Failed to create campaign log entry: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CampaignLogCreateParams>(),
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
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let campaign_logs = campaign_logs.clone();
            async move {
                let params: CampaignLogCreateParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &campaign_logs).await)
            }
            .boxed()
        })
    }
}

/// Parse a session date in the accepted ISO 8601 shapes.
///
/// Accepts full RFC 3339, a bare date, or a date-time without zone (read as
/// UTC).
fn parse_log_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|ndt| Utc.from_utc_datetime(&ndt));
    }
    None
}
