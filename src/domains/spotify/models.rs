//! Request parameters and response projections for the Spotify client.
//!
//! The search result types flatten Spotify's deeply nested payload into the
//! handful of fields the assistant actually surfaces to clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Entity kinds accepted by the Spotify search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Album,
    Artist,
    Playlist,
    Track,
    Show,
    Episode,
    Audiobook,
}

impl SearchType {
    /// Wire name used in the comma-joined `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Playlist => "playlist",
            Self::Track => "track",
            Self::Show => "show",
            Self::Episode => "episode",
            Self::Audiobook => "audiobook",
        }
    }
}

/// Parameters for a track search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The search query, e.g. a title, artist, or mood description.
    #[schemars(description = "Search query (title, artist, or free-text description)")]
    pub q: String,

    /// Entity kinds to search; defaults to tracks only.
    #[serde(rename = "type", default = "default_search_types")]
    #[schemars(description = "Entity kinds to search (default: [\"track\"])")]
    pub types: Vec<SearchType>,

    /// ISO 3166-1 alpha-2 country code, or "from_token".
    #[schemars(description = "Market: ISO 3166-1 alpha-2 country code or \"from_token\"")]
    pub market: Option<String>,

    /// Maximum number of results (1-50, default 20).
    #[serde(default = "default_search_limit")]
    #[schemars(description = "Maximum number of results (1-50, default 20)")]
    pub limit: u32,

    /// Index of the first result to return (default 0).
    #[serde(default)]
    #[schemars(description = "Index of the first result to return (default 0)")]
    pub offset: u32,
}

pub(crate) fn default_search_types() -> Vec<SearchType> {
    vec![SearchType::Track]
}

pub(crate) fn default_search_limit() -> u32 {
    20
}

/// One track from a search, flattened for display.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TrackSummary {
    pub name: String,
    /// First credited artist.
    pub artist: String,
    pub album: String,
    /// Spotify URI, usable with the playback tool.
    pub uri: String,
    pub id: String,
    /// Largest album cover, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    /// Direct API endpoint for the track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// An album image reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImageRef {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Body of a start-playback request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PlaybackRequest {
    /// Context to play: an album, artist, or playlist URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,

    /// Explicit track URIs to play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,

    /// Where in the context to start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<PlaybackOffset>,

    /// Position within the first item, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,
}

/// Start offset within a playback context.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PlaybackOffset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

// ============================================================================
// Wire shapes (deserialization only)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackPage {
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackItem {
    pub name: String,
    pub uri: String,
    pub id: String,
    pub href: Option<String>,
    pub album: AlbumRef,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumRef {
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistRef {
    pub name: String,
}

impl From<TrackItem> for TrackSummary {
    fn from(track: TrackItem) -> Self {
        Self {
            artist: track
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            album: track.album.name,
            image: track.album.images.into_iter().next(),
            name: track.name,
            uri: track.uri,
            id: track.id,
            href: track.href,
        }
    }
}
