use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    errors::{LedgerError, Result},
    ledger::Record,
};

use super::StorageBackend;

pub const DEFAULT_LEDGER_FILE: &str = "transactions.json";
const TMP_SUFFIX: &str = "tmp";

/// How [`JsonStorage`] replaces the document on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and rewrite the document in place. A crash mid-write can leave it torn.
    #[default]
    Overwrite,
    /// Stage to a sibling `.tmp` file, then rename it over the document.
    Atomic,
}

/// Stores the ledger as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
    write_mode: WriteMode,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>, write_mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            write_mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Vec<Record>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "ledger document absent, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let records: Vec<Record> =
            serde_json::from_str(&data).map_err(|source| LedgerError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded ledger");
        Ok(records)
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        match self.write_mode {
            WriteMode::Overwrite => write_file(&self.path, &json)?,
            WriteMode::Atomic => {
                let tmp = tmp_path(&self.path);
                write_file(&tmp, &json)?;
                fs::rename(&tmp, &self.path)?;
            }
        }
        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            mode = ?self.write_mode,
            "saved ledger"
        );
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Amount, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_in(temp: &TempDir, mode: WriteMode) -> JsonStorage {
        JsonStorage::new(temp.path().join("ledger.json"), mode)
    }

    fn sample_records() -> Vec<Record> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        vec![
            Record::new(TransactionKind::Income, "salary", Amount::from_i64(1000), date),
            Record::new(
                TransactionKind::Expense,
                "food",
                Amount::from_f64(19.99).unwrap(),
                date,
            ),
        ]
    }

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        assert_eq!(
            tmp_path(Path::new("/data/ledger.json")),
            PathBuf::from("/data/ledger.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("ledger")), PathBuf::from("ledger.tmp"));
    }

    #[test]
    fn atomic_save_leaves_no_staging_file() {
        let temp = TempDir::new().expect("temp dir");
        let storage = storage_in(&temp, WriteMode::Atomic);
        storage.save(&sample_records()).expect("save");
        assert!(storage.path().exists());
        assert!(!tmp_path(storage.path()).exists());
        assert_eq!(storage.load().expect("load"), sample_records());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("nested/dir/ledger.json"), WriteMode::Overwrite);
        storage.save(&sample_records()).expect("save");
        assert_eq!(storage.load().expect("load").len(), 2);
    }

    #[test]
    fn save_writes_indented_array() {
        let temp = TempDir::new().expect("temp dir");
        let storage = storage_in(&temp, WriteMode::Overwrite);
        storage.save(&sample_records()).expect("save");
        let raw = fs::read_to_string(storage.path()).unwrap();
        assert!(raw.starts_with("[\n"), "unexpected layout: {raw}");
        assert!(raw.contains("\"type\": \"income\""));
        assert!(raw.contains("\"amount\": 1000,"));
        assert!(raw.contains("\"amount\": 19.99,"));
    }

    #[test]
    fn truncated_document_is_reported_as_malformed() {
        let temp = TempDir::new().expect("temp dir");
        let storage = storage_in(&temp, WriteMode::Overwrite);
        fs::write(storage.path(), "[{\"type\": \"income\", \"categ").unwrap();
        let err = storage.load().expect_err("truncated JSON must fail");
        assert!(
            matches!(err, LedgerError::Malformed { ref path, .. } if path == storage.path()),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path(), WriteMode::Overwrite);
        let err = storage.load().expect_err("a directory is not a document");
        assert!(matches!(err, LedgerError::Io(_)), "unexpected error: {err:?}");
    }
}
