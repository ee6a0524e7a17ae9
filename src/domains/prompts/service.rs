//! Prompt service implementation.
//!
//! The PromptService manages prompt templates and their instantiation.
//! Most prompts render purely from client arguments; the campaign recap
//! additionally pulls the most recent log entries out of the store.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::info;

use crate::core::config::StorageConfig;
use crate::domains::store::{CampaignLogEntry, JsonStore};

use super::definitions::{PromptDefinition, SummarizeRecentLogsPrompt};
use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// How many log entries the recap prompt embeds.
const RECENT_LOG_COUNT: usize = 3;

/// Service for managing and instantiating prompts.
pub struct PromptService {
    /// Registry of available prompts.
    /// Key: prompt name, Value: prompt template
    prompts: HashMap<String, PromptTemplate>,

    /// Log store backing the recap prompt.
    campaign_logs: JsonStore<CampaignLogEntry>,
}

impl PromptService {
    /// Create a new PromptService over the configured store files.
    pub fn new(storage: &StorageConfig) -> Self {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: HashMap::new(),
            campaign_logs: JsonStore::new(storage.campaign_logs_path()),
        };

        // Register all prompts from registry
        service.register_from_registry();

        service
    }

    /// Register all prompts from the registry.
    fn register_from_registry(&mut self) {
        info!("Registering prompts from registry");
        for template in get_all_prompts() {
            self.register_prompt(template);
        }
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        info!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let mut arguments = arguments.unwrap_or_default();

        // Validate required arguments
        for arg in &template.arguments {
            if arg.required.unwrap_or(false) && !arguments.contains_key(&arg.name) {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        // The recap prompt embeds store content rather than client input
        if name == SummarizeRecentLogsPrompt::NAME {
            let recent = self.campaign_logs.tail(RECENT_LOG_COUNT).await?;
            if recent.is_empty() {
                return Ok(GetPromptResult {
                    description: template.description.clone(),
                    messages: vec![PromptMessage::new_text(
                        PromptMessageRole::User,
                        "No campaign logs found to summarize.".to_string(),
                    )],
                });
            }
            let rendered = recent
                .iter()
                .map(CampaignLogEntry::display_text)
                .collect::<Vec<_>>()
                .join("\n\n");
            arguments.insert(SummarizeRecentLogsPrompt::LOGS_VARIABLE.to_string(), rendered);
        }

        let content = template.render(&arguments);

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}
