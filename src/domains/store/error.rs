//! Store-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// A missing backing file is not represented here: reading a store that has
/// never been written yields the empty record sequence, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but could not be read.
    #[error("failed to read store file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file was read but does not contain a valid record array.
    #[error("failed to parse store file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The record sequence could not be serialized for writing.
    #[error("failed to serialize records for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The rewritten backing file could not be persisted.
    #[error("failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
