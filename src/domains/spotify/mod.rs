//! Spotify Web API client domain.
//!
//! This module wraps the outbound Spotify calls made by the search and
//! playback tools. Its central piece is [`SpotifyClient::call`], which
//! attaches the right `Authorization` header for the selected mode and
//! transparently performs a single refresh-and-retry cycle when a
//! user-token request comes back 401.
//!
//! ## Architecture
//!
//! - `client.rs` - The HTTP caller, refresh cycle, and API wrappers
//! - `token.rs` - The mutable bearer-token cell
//! - `models.rs` - Request parameters and response projections
//! - `error.rs` - Spotify-specific error types

mod client;
mod error;
mod models;
mod token;

pub use client::{ApiAuth, ApiBody, SpotifyClient};
pub use error::SpotifyError;
pub use models::{
    ImageRef, PlaybackOffset, PlaybackRequest, SearchParams, SearchType, TrackSummary,
};
pub use token::UserToken;
