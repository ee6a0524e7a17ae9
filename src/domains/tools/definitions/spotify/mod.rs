//! Spotify tools module.
//!
//! Search and playback tools for setting the session's ambiance:
//! - `search`: Find tracks by title, artist, or mood description
//! - `play`: Start playback of tracks or a context on the user's device

pub mod play;
pub mod search;

pub use play::SpotifyPlayTool;
pub use search::SpotifySearchTool;
