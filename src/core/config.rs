//! Configuration management for the campaign assistant server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the campaign assistant server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Record store configuration.
    pub storage: StorageConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Spotify Web API credentials and endpoints.
    pub spotify: SpotifyConfig,

    /// LLM generation backend configuration.
    pub generation: GenerationConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the JSON record stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON store files.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Backing file for the user store.
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    /// Backing file for the campaign-log store.
    pub fn campaign_logs_path(&self) -> PathBuf {
        self.data_dir.join("campaign_logs.json")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Spotify Web API credentials and endpoints.
///
/// The client id/secret pair identifies this application; the refresh token
/// is the long-lived credential exchanged for short-lived bearer tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// OAuth client id for the registered Spotify application.
    pub client_id: Option<String>,

    /// OAuth client secret paired with `client_id`.
    pub client_secret: Option<String>,

    /// Long-lived refresh token for the acting user.
    pub refresh_token: Option<String>,

    /// Optional initial bearer token for the acting user.
    pub user_token: Option<String>,

    /// Base URL of the resource API.
    pub api_base: String,

    /// Base URL of the accounts service (token endpoint).
    pub accounts_base: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("user_token", &self.user_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("accounts_base", &self.accounts_base)
            .finish()
    }
}

/// LLM generation backend configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API key for the chat-completion backend.
    pub openai_api_key: Option<String>,

    /// Chat-completion model identifier.
    pub text_model: String,

    /// Base URL of the chat-completion backend.
    pub openai_base: String,

    /// Base URL of the image generation service.
    pub image_base: String,

    /// Image generation model identifier.
    pub image_model: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("text_model", &self.text_model)
            .field("openai_base", &self.openai_base)
            .field("image_base", &self.image_base)
            .field("image_model", &self.image_model)
            .finish()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            refresh_token: None,
            user_token: None,
            api_base: "https://api.spotify.com/v1".to_string(),
            accounts_base: "https://accounts.spotify.com".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            text_model: "gpt-4o".to_string(),
            openai_base: "https://api.openai.com".to_string(),
            image_base: "https://image.pollinations.ai".to_string(),
            image_model: "flux".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "campaign-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            storage: StorageConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            spotify: SpotifyConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server-level settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_DATA_DIR`). External service credentials use
    /// their conventional names (`SPOTIFY_CLIENT_ID`, `OPENAI_API_KEY`, ...).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(data_dir) = std::env::var("MCP_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        config.spotify.client_id = std::env::var("SPOTIFY_CLIENT_ID").ok();
        config.spotify.client_secret = std::env::var("SPOTIFY_CLIENT_SECRET").ok();
        config.spotify.refresh_token = std::env::var("SPOTIFY_REFRESH_TOKEN").ok();
        config.spotify.user_token = std::env::var("SPOTIFY_USER_BEARER_TOKEN").ok();

        if config.spotify.client_id.is_none() || config.spotify.client_secret.is_none() {
            warn!(
                "SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET not set - Spotify tools \
                 will fail until credentials are configured"
            );
        } else {
            info!("Spotify application credentials loaded from environment");
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.generation.openai_api_key = Some(api_key);
            info!("Generation API key loaded from environment");
        } else {
            warn!(
                "OPENAI_API_KEY not set - log summaries and random user \
                 generation will be unavailable"
            );
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.generation.text_model = model;
        }

        config
    }
}
