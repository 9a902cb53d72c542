//! Append-only JSON Lines journal of every calculation.
//!
//! Unlike the history file, the journal is never rewritten: undo and clear
//! do not remove entries from it.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{PersistenceError, PersistenceResult};
use super::persistence::{LoadReport, parse_records};
use crate::calculation::Calculation;

#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line, creating the file if needed.
    pub fn append(&self, record: &Calculation) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
            }
        }

        let line = serde_json::to_string(record)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e))?;
        writeln!(file, "{line}").map_err(|e| PersistenceError::io(&self.path, e))?;
        Ok(())
    }

    /// Read back all journal entries, skipping malformed lines.
    pub fn read(&self) -> PersistenceResult<LoadReport> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_records(&content, &self.path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PersistenceError::NotFound {
                path: self.path.clone(),
            }),
            Err(e) => Err(PersistenceError::io(&self.path, e)),
        }
    }
}
