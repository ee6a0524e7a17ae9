//! Shared services handed to tool routes.

use std::sync::Arc;

use crate::core::config::Config;
use crate::domains::generation::GenerationClient;
use crate::domains::spotify::SpotifyClient;
use crate::domains::store::{CampaignLogEntry, JsonStore, User};

/// The service bundle tools draw their dependencies from.
///
/// Everything here is cheap to clone (all `Arc`s); each route captures only
/// the pieces it needs.
#[derive(Clone)]
pub struct ToolContext {
    /// Spotify Web API client (search + playback).
    pub spotify: Arc<SpotifyClient>,

    /// LLM generation client (summaries, fake data, image URLs).
    pub generation: Arc<GenerationClient>,

    /// Plain HTTP client for unauthenticated lookups (D&D 5e API).
    pub http: reqwest::Client,

    /// The user record store.
    pub users: Arc<JsonStore<User>>,

    /// The campaign-log record store.
    pub campaign_logs: Arc<JsonStore<CampaignLogEntry>>,
}

impl ToolContext {
    /// Build the full service bundle from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            spotify: Arc::new(SpotifyClient::new(config.spotify.clone())),
            generation: Arc::new(GenerationClient::new(config.generation.clone())),
            http: reqwest::Client::new(),
            users: Arc::new(JsonStore::new(config.storage.users_path())),
            campaign_logs: Arc::new(JsonStore::new(config.storage.campaign_logs_path())),
        }
    }
}
