//! High score persistence
//!
//! The high score is a single decimal integer in a text file. Persistence is
//! best effort: a missing or corrupt file reads as 0 and a failed write is
//! logged and dropped, so storage problems never interrupt a game.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.txt";

/// Durable storage for the best score
pub trait ScoreStore {
    /// Stored high score, 0 when nothing usable is stored
    fn load(&self) -> u32;

    /// Persist a new high score
    fn save(&mut self, score: u32);
}

/// Keeps the high score in a plain text file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let score = contents
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid high score in {:?}: {:?}", self.path, contents))?;

        Ok(Some(score))
    }

    fn try_save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(Some(score)) => score,
            Ok(None) => {
                log::debug!("no high score file at {:?}", self.path);
                0
            }
            Err(err) => {
                log::warn!("{:#}, starting from 0", err);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        match self.try_save(score) {
            Ok(()) => log::info!("saved high score {} to {:?}", score, self.path),
            Err(err) => log::warn!("{:#}", err),
        }
    }
}

/// Store that lives only as long as the process
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryScoreStore {
    pub score: u32,
    pub saves: usize,
}

#[cfg(test)]
impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
        self.saves += 1;
    }
}
