//! Error types for message page loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a message page
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read message page {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse message page from {origin}")]
    ParseJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record at index {index} ({id}): {reason}")]
    InvalidRecord {
        index: usize,
        id: String,
        reason: String,
    },
}
