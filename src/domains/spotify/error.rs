//! Spotify-specific error types.

use thiserror::Error;

/// Errors that can occur while calling the Spotify Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// A required credential or environment value is absent.
    #[error("{0} is not configured")]
    Config(&'static str),

    /// The one-shot token refresh did not yield a usable access token.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// The API returned a non-2xx status after at most one retry.
    #[error("Spotify API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape this client expects.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The search query string could not be encoded.
    #[error("failed to encode query string: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl SpotifyError {
    /// True for the 401 status that triggers the refresh cycle.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}
