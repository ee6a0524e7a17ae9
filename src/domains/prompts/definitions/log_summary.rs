//! Campaign recap prompt definition.
//!
//! The `{{logs}}` placeholder is not a client argument: the prompt service
//! fills it with the most recent campaign-log entries at instantiation time.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Prompt for a narrative recap of the recent campaign sessions.
pub struct SummarizeRecentLogsPrompt;

impl SummarizeRecentLogsPrompt {
    /// The placeholder the service fills from the log store.
    pub const LOGS_VARIABLE: &'static str = "logs";
}

impl PromptDefinition for SummarizeRecentLogsPrompt {
    const NAME: &'static str = "summarize_recent_logs";
    const DESCRIPTION: &'static str = "Generate a narrative summary of the last 3 campaign logs";

    fn template() -> &'static str {
        "Generate a summary of the last 3 campaign logs:\n\n{{logs}}\n\n\
         Provide a concise overview of the key events and themes in these logs. \
         Write a cohesive, third-person narrative summary of the last three TTRPG \
         campaign sessions. Blend the events from each log into a single flowing \
         story, maintaining a fantasy-adventure tone. Highlight character actions, \
         important dialogue or moments (even if invented to enrich the summary), \
         and build tension where appropriate. Focus on immersive storytelling \
         rather than exposition or analysis. The summary should be engaging and \
         suitable for sharing with players to recap the recent campaign events. \
         Aim for a length of around 200-300 words."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_metadata() {
        assert_eq!(SummarizeRecentLogsPrompt::NAME, "summarize_recent_logs");
        assert!(SummarizeRecentLogsPrompt::arguments().is_empty());
        assert!(SummarizeRecentLogsPrompt::template().contains("{{logs}}"));
    }
}
