//! The mutable bearer-token cell.
//!
//! Spotify user tokens are short-lived; the refresh cycle replaces the held
//! value wholesale. Making the holder an explicit, injectable value (rather
//! than process environment state) keeps ownership with the client and makes
//! the replacement observable in tests.

use std::sync::RwLock;

/// Holder for the current user bearer token.
///
/// The lock is held only for the duration of a read or a swap, never across
/// an await point.
#[derive(Debug, Default)]
pub struct UserToken {
    current: RwLock<Option<String>>,
}

impl UserToken {
    /// Create a cell, optionally seeded with an initial token.
    pub fn new(initial: Option<String>) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// The token currently held, if any.
    pub fn current(&self) -> Option<String> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the held token wholesale.
    pub fn replace(&self, token: impl Into<String>) {
        let value = Some(token.into());
        match self.current.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
