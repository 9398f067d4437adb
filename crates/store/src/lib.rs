//! File-backed high-score persistence
//!
//! The record is a single decimal number in a plain text file - nothing
//! else crosses this boundary. Persistence failures are deliberately
//! non-fatal: they are logged here and the game keeps running with an
//! unsaved record, which is why the [`HighScoreStore`] trait surface is
//! infallible.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use brick_tetris_core::HighScoreStore;

/// Default record file, relative to the working directory
pub const DEFAULT_PATH: &str = "high_score.txt";

/// High-score store persisting to a text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`DEFAULT_PATH`]
    pub fn open_default() -> Self {
        Self::new(DEFAULT_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record; `None` when no file exists yet
    fn read(&self) -> Result<Option<u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let value = text
            .trim()
            .parse::<u32>()
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(value))
    }

    fn write(&self, value: u32) -> Result<()> {
        fs::write(&self.path, value.to_string())
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> u32 {
        match self.read() {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(err) => {
                warn!("failed to load high score: {err:#}");
                0
            }
        }
    }

    fn save(&mut self, value: u32) {
        if let Err(err) = self.write(value) {
            warn!("failed to save high score: {err:#}");
        }
    }
}
