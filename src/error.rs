//! Error types for the `home_message` crate.

use std::path::PathBuf;

/// All errors that can occur while storing records or running the expiry worker.
#[derive(Debug, thiserror::Error)]
pub enum HomeMessageError {
    /// The backing file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file (or its directory) could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file does not hold a valid JSON array of records.
    #[error("Malformed records in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The in-memory collection could not be serialized.
    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    /// `update` was called with an id the store does not hold.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The background expiry worker has stopped or its queue is full.
    #[error("Channel closed or full")]
    ChannelClosed,

    /// The builder configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, HomeMessageError>`.
pub type Result<T> = std::result::Result<T, HomeMessageError>;
