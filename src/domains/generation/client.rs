//! Text and image generation client.
//!
//! Text goes through a chat-completion endpoint; images are served by a
//! prompt-in-the-URL service, so "generating" an image is pure URL
//! construction and costs no network call until someone dereferences it.

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::core::config::GenerationConfig;

use super::error::GenerationError;

const TEXT_TEMPERATURE: f64 = 0.7;
const TEXT_MAX_TOKENS: u32 = 1000;

/// Options for image URL generation.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub width: u32,
    pub height: u32,
    /// Fixed seed for reproducible output; omitted when `None`.
    pub seed: Option<u64>,
    pub nologo: bool,
    pub private: bool,
    pub enhance: bool,
    pub safe: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            seed: None,
            nologo: true,
            private: false,
            enhance: false,
            safe: true,
        }
    }
}

/// Client for the LLM generation backends.
pub struct GenerationClient {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl GenerationClient {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Generate text from a single user prompt.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .openai_api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        debug!("requesting completion from model {}", self.config.text_model);

        let body = json!({
            "model": self.config.text_model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEXT_TEMPERATURE,
            "max_tokens": TEXT_MAX_TOKENS,
        });

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.config.openai_base))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response.json().await?;
        value["choices"][0]["message"]["content"]
            .as_str()
            .filter(|content| !content.is_empty())
            .map(str::to_string)
            .ok_or(GenerationError::EmptyCompletion)
    }

    /// Build the image URL for a prompt.
    ///
    /// The prompt is percent-encoded into the path; generation parameters
    /// travel as query parameters.
    pub fn image_url(&self, prompt: &str, options: &ImageOptions) -> Result<String, GenerationError> {
        let mut url = reqwest::Url::parse(&self.config.image_base)
            .map_err(|e| GenerationError::InvalidBaseUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|()| GenerationError::InvalidBaseUrl("endpoint cannot be a base".to_string()))?
            .push("prompt")
            .push(prompt);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("model", &self.config.image_model);
            pairs.append_pair("width", &options.width.to_string());
            pairs.append_pair("height", &options.height.to_string());
            if let Some(seed) = options.seed {
                pairs.append_pair("seed", &seed.to_string());
            }
            pairs.append_pair("nologo", if options.nologo { "true" } else { "false" });
            pairs.append_pair("private", if options.private { "true" } else { "false" });
            pairs.append_pair("enhance", if options.enhance { "true" } else { "false" });
            pairs.append_pair("safe", if options.safe { "true" } else { "false" });
        }

        info!("built image URL for prompt ({} chars)", prompt.len());
        Ok(url.to_string())
    }
}
