//! Campaign-log tools module.
//!
//! - `create_log`: Record a session entry
//! - `latest_log`: Fetch the most recent entry
//! - `summarize`: Narrative recap of the most recent entries

pub mod create_log;
pub mod latest_log;
pub mod summarize;

pub use create_log::CampaignLogCreateTool;
pub use latest_log::CampaignLogLatestTool;
pub use summarize::CampaignLogSummarizeTool;

/// How many entries feed the narrative recap.
pub const RECENT_LOG_COUNT: usize = 3;
