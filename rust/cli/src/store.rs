//! File-backed save slot.
//!
//! The slot is one JSON document on disk. Writes go to a sibling temp file
//! first and are renamed into place, so an interrupted save never leaves a
//! half-written record behind.

use crate::io_utils::ensure_parent_dir;
use spider_engine::errors::StoreError;
use spider_engine::persist::{GameStore, SavedGame};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl GameStore for FileStore {
    fn load(&self) -> Result<Option<SavedGame>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(serde_json::from_str(&s)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, record: &SavedGame) -> Result<(), StoreError> {
        ensure_parent_dir(&self.path)?;
        let tmp = self.temp_path();
        fs::write(&tmp, record.to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "game saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "save slot cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
