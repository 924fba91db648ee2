//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one record. Readers fail
//! on the first unreadable line: the store rewrites the whole file on save,
//! so a record that was skipped on read would be lost on write.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{ScoreboardStore, StorageConfig, StorageError};
use crate::models::{Scoreboard, ScoreboardKey};

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    ///
    /// Writes to a sibling temp file first and renames it over the target,
    /// so readers never see a half-written file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let tmp_path = self.path.with_extension("jsonl.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &self.path)?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file, skipping blank lines.
    ///
    /// A line that fails to parse aborts the read with
    /// [`StorageError::Corrupt`] naming the 1-based line number.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let entity = serde_json::from_str(&line).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                line: i + 1,
                source,
            })?;
            entities.push(entity);
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Scoreboard store backed by `scoreboards.jsonl` in the data directory.
#[derive(Debug, Clone)]
pub struct JsonlScoreboardStore {
    path: PathBuf,
}

impl JsonlScoreboardStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            path: config.scoreboards_path(),
        }
    }

    fn read_all(&self) -> Result<Vec<Scoreboard>, StorageError> {
        JsonlReader::<Scoreboard>::new(self.path.clone()).read_all()
    }

    fn matches(board: &Scoreboard, key: &ScoreboardKey) -> bool {
        board.league_key == key.league_key && board.season_key == key.season_key
    }
}

#[async_trait]
impl ScoreboardStore for JsonlScoreboardStore {
    async fn load(&self, key: &ScoreboardKey) -> Result<Option<Scoreboard>, StorageError> {
        let board = self
            .read_all()?
            .into_iter()
            .find(|b| Self::matches(b, key));
        debug!("Loaded scoreboard {} (found: {})", key, board.is_some());
        Ok(board)
    }

    async fn save(&self, board: &Scoreboard) -> Result<(), StorageError> {
        let key = board.key();
        let mut boards = self.read_all()?;

        match boards.iter_mut().find(|b| Self::matches(b, &key)) {
            Some(existing) => *existing = board.clone(),
            None => boards.push(board.clone()),
        }

        JsonlWriter::new(self.path.clone()).write_all(&boards)?;
        Ok(())
    }

    async fn create(&self, board: &Scoreboard) -> Result<(), StorageError> {
        let key = board.key();
        if self.read_all()?.iter().any(|b| Self::matches(b, &key)) {
            return Err(StorageError::AlreadyExists(key));
        }

        JsonlWriter::new(self.path.clone()).append(board)?;
        info!("Created scoreboard {}", key);
        Ok(())
    }
}
