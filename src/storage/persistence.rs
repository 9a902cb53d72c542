//! JSON persistence for calculation history.
//!
//! The history file is a pretty-printed JSON array of records. Loading is
//! tolerant: each record is decoded on its own and malformed ones are
//! skipped with a warning, so one bad entry never costs the whole file.
//! Files that are not a JSON array are read as JSON Lines instead, which
//! also makes the autosave journal loadable.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

use super::error::{PersistenceError, PersistenceResult};
use crate::calculation::Calculation;

/// Records recovered from a persisted store.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Valid records, oldest first.
    pub records: Vec<Calculation>,
    /// Number of malformed records that were skipped.
    pub skipped: usize,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.records.len()
    }
}

/// Storage backend for the calculation history.
pub trait HistoryStore: Send + Sync {
    /// Location of the persisted history.
    fn path(&self) -> &Path;

    /// Replace the persisted history with `records`.
    fn store(&self, records: &[Calculation]) -> PersistenceResult<()>;

    /// Read every valid record. A missing file is [`PersistenceError::NotFound`].
    fn load(&self) -> PersistenceResult<LoadReport>;

    fn exists(&self) -> bool {
        self.path().exists()
    }
}

/// History store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn store(&self, records: &[Calculation]) -> PersistenceResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| PersistenceError::io(&parent, e))?;

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        // Sibling temp file, renamed over the target.
        let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| PersistenceError::io(&parent, e))?;
        if let Err(e) = writeln!(tmp, "{json}") {
            return Err(PersistenceError::io(tmp.path(), e));
        }
        tmp.persist(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e.error))?;

        crate::debug_event!("store", "saved", "{} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> PersistenceResult<LoadReport> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let report = parse_records(&content, &self.path);
        crate::debug_event!(
            "store",
            "loaded",
            "{} records ({} skipped) from {}",
            report.loaded(),
            report.skipped,
            self.path.display()
        );
        Ok(report)
    }
}

/// Decode records from a JSON array document or from JSON Lines.
pub fn parse_records(content: &str, source: &Path) -> LoadReport {
    let mut report = LoadReport::default();
    if content.trim().is_empty() {
        return report;
    }

    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => {
            for (index, item) in items.into_iter().enumerate() {
                decode_into(&mut report, item, source, index + 1);
            }
        }
        Ok(single @ Value::Object(_)) => decode_into(&mut report, single, source, 1),
        _ => {
            for (index, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Value>(line) {
                    Ok(value) => decode_into(&mut report, value, source, index + 1),
                    Err(e) => {
                        tracing::warn!(
                            "[store] skipping unreadable record {} in {}: {e}",
                            index + 1,
                            source.display()
                        );
                        report.skipped += 1;
                    }
                }
            }
        }
    }

    if report.records.is_empty() && report.skipped > 0 {
        tracing::warn!(
            "[store] no valid records in {}, starting with empty history",
            source.display()
        );
    }
    report
}

fn decode_into(report: &mut LoadReport, value: Value, source: &Path, position: usize) {
    match serde_json::from_value::<Calculation>(value) {
        Ok(record) => report.records.push(record),
        Err(e) => {
            tracing::warn!(
                "[store] skipping malformed record {position} in {}: {e}",
                source.display()
            );
            report.skipped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Calculation> {
        vec![
            Calculation::new("add", 2.0, 3.0, 5.0),
            Calculation::new("sin", 30.0, 0.0, 0.5),
        ]
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(temp_dir.path().join("nested/dir/history.json"));

        store.store(&sample()).unwrap();
        assert!(store.exists());

        let report = store.load().unwrap();
        assert_eq!(report.skipped, 0);
        assert_eq!(report.records, sample());
    }

    #[test]
    fn test_store_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(temp_dir.path().join("history.json"));

        store.store(&sample()).unwrap();
        store.store(&sample()[..1]).unwrap();
        assert_eq!(store.load().unwrap().loaded(), 1);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(temp_dir.path().join("absent.json"));
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(PersistenceError::NotFound { .. })));
    }

    #[test]
    fn test_skips_invalid_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(
            &path,
            r#"[
                {"operation": "add", "a": "x"},
                {"operation": "add", "a": 1, "b": 2, "result": 3, "timestamp": "2026-01-01T00:00:00Z"},
                42
            ]"#,
        )
        .unwrap();

        let report = JsonHistoryStore::new(&path).load().unwrap();
        assert_eq!(report.loaded(), 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.records[0].result(), 3.0);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "{ invalid json }").unwrap();

        let report = JsonHistoryStore::new(&path).load().unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "  \n").unwrap();

        let report = JsonHistoryStore::new(&path).load().unwrap();
        assert_eq!(report.loaded(), 0);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_reads_json_lines() {
        let content = concat!(
            r#"{"operation":"add","a":1,"b":1,"result":2}"#,
            "\n\n",
            "garbage\n",
            r#"{"operation":"abs","a":-3,"b":0,"result":3}"#,
            "\n"
        );
        let report = parse_records(content, Path::new("journal.jsonl"));
        assert_eq!(report.loaded(), 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.records[1].operation(), "abs");
    }
}
