use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Expense;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Expense file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize expenses: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// JSON file holding the whole expense ledger as an array of records.
///
/// Every invocation loads the full array and, after a mutation, writes the
/// full array back. There is no locking: two processes saving at the same
/// time can lose each other's updates.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every expense. A missing file is an empty ledger.
    pub fn load(&self) -> Result<Vec<Expense>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "expense file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let expenses: Vec<Expense> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                StoreError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            })?;

        tracing::debug!(path = %self.path.display(), count = expenses.len(), "loaded expenses");
        Ok(expenses)
    }

    /// Replace the file contents with `expenses`.
    ///
    /// Writes to a sibling temp file, syncs it, then renames it over the
    /// target so a reader never sees a half-written ledger.
    pub fn save(&self, expenses: &[Expense]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let temp_path = self.temp_path();
        let file = File::create(&temp_path).map_err(|source| self.write_error(source))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, expenses).map_err(StoreError::Serialize)?;
        writer.flush().map_err(|source| self.write_error(source))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|source| self.write_error(source))?;

        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            self.write_error(source)
        })?;

        tracing::debug!(path = %self.path.display(), count = expenses.len(), "saved expenses");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "expenses.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
