//! JSON file of timeblock records.
//!
//! Stands in for the external record store: one array of
//! `{date, start_time, end_time}` objects, rewritten whole on every save.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{TimeblockError, TimeblockResult};
use crate::timeblock::Timeblock;

#[derive(Debug, Clone)]
pub struct TimeblockStore {
    path: PathBuf,
}

impl TimeblockStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TimeblockStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all stored blocks. A missing file is an empty store.
    pub fn load(&self) -> TimeblockResult<Vec<Timeblock>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store file missing, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let blocks: Vec<Timeblock> = serde_json::from_str(&content).map_err(|e| {
            TimeblockError::Store(format!("Could not parse {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), count = blocks.len(), "loaded timeblocks");
        Ok(blocks)
    }

    /// Replace the stored blocks.
    pub fn save(&self, blocks: &[Timeblock]) -> TimeblockResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(blocks)?;
        std::fs::write(&self.path, content)?;

        debug!(path = %self.path.display(), count = blocks.len(), "saved timeblocks");
        Ok(())
    }
}
