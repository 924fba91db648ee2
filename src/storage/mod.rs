//! Scoreboard persistence.
//!
//! Records live in a single JSONL file under the data directory, one line
//! per league season. Access goes through [`ScoreboardStore`] so handlers
//! and the CLI never touch files directly.

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Scoreboard, ScoreboardKey};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unreadable record at {path:?} line {line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Scoreboard already exists: {0}")]
    AlreadyExists(ScoreboardKey),
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

    pub fn scoreboards_path(&self) -> PathBuf {
        self.data_dir.join("scoreboards.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Load and save scoreboard records.
///
/// Saves replace the whole record. There is no version check, so two
/// writers working from the same read keep whichever saves last.
#[async_trait]
pub trait ScoreboardStore: Send + Sync {
    /// Fetch a record, or `None` if it was never created.
    async fn load(&self, key: &ScoreboardKey) -> Result<Option<Scoreboard>, StorageError>;

    /// Replace (or insert) the record with the same key.
    async fn save(&self, board: &Scoreboard) -> Result<(), StorageError>;

    /// Insert a new record, failing if one with the same key exists.
    async fn create(&self, board: &Scoreboard) -> Result<(), StorageError>;
}
