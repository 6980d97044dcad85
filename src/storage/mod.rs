//! Filesystem persistence.
//!
//! The whole collection lives in one JSON file that is rewritten after
//! every mutation, mirroring the in-memory state. No transactions and no
//! partial-write recovery: a failed save leaves memory authoritative.

mod json;

pub use json::JsonStore;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// The single persisted collection file.
    pub fn players_file(&self) -> PathBuf {
        self.data_dir.join("players.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
