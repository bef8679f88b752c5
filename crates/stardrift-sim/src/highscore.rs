//! Persisted high score.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use stardrift_core::error::StoreError;

/// Somewhere the best score survives between sessions.
pub trait HighScoreStore: Send {
    /// Stored score; 0 when nothing has been saved yet.
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Keeps the score for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    score: u32,
}

impl MemoryHighScore {
    pub fn new(score: u32) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.score = score;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// A small JSON document on disk: `{"high_score": N}`.
#[derive(Debug, Clone)]
pub struct JsonFileHighScore {
    path: PathBuf,
}

impl JsonFileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> Result<u32, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}
