//! JsonFileStore: the ledger document on the local filesystem.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use parkwatch_core::constants::{BACKUP_SUFFIX, TEMP_SUFFIX};
use parkwatch_core::errors::StorageError;
use parkwatch_core::models::LedgerState;
use parkwatch_core::traits::{LedgerStore, LoadOutcome};

use crate::document::LedgerDocument;

/// Suffix given to a malformed document moved out of the way on load.
const CORRUPT_SUFFIX: &str = "corrupt";

/// Stores the ledger as one pretty-printed JSON file.
///
/// Saves go to `<file>.tmp`, are fsynced, then renamed over `<file>`, so a
/// crash leaves either the old or the new document, never a torn one.
/// No cross-process locking: one writer per document.
///
/// A document that exists but cannot be read (permissions, I/O errors) is
/// left untouched, and saves are refused until a later `load` succeeds.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    keep_backup: bool,
    unreadable: Mutex<Option<String>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep_backup: false,
            unreadable: Mutex::new(None),
        }
    }

    /// Copy the previous document to `<file>.bak` before each replace.
    pub fn with_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn temp_path(&self) -> PathBuf {
        sibling(&self.path, TEMP_SUFFIX)
    }

    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, BACKUP_SUFFIX)
    }

    pub fn corrupt_path(&self) -> PathBuf {
        sibling(&self.path, CORRUPT_SUFFIX)
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    /// Why saves are currently refused, if they are.
    pub fn save_blocked(&self) -> Option<String> {
        match self.unreadable.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_unreadable(&self, reason: Option<String>) {
        match self.unreadable.lock() {
            Ok(mut guard) => *guard = reason,
            Err(poisoned) => *poisoned.into_inner() = reason,
        }
    }

    fn read_document(&self) -> Result<LedgerState, StorageError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                StorageError::Malformed {
                    path: self.display(),
                    details: "document is not valid UTF-8".to_string(),
                }
            } else {
                StorageError::io(self.display(), e)
            }
        })?;
        let document: LedgerDocument =
            serde_json::from_str(&content).map_err(|e| StorageError::Malformed {
                path: self.display(),
                details: e.to_string(),
            })?;
        document.into_state().map_err(|details| StorageError::Malformed {
            path: self.display(),
            details,
        })
    }

    /// Move a malformed document aside so the next save cannot destroy
    /// the evidence. Returns whether the move happened.
    fn quarantine(&self) -> bool {
        let target = self.corrupt_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => {
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %target.display(),
                    "moved malformed ledger document aside"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not move malformed ledger document aside"
                );
                false
            }
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::io(parent.display().to_string(), e))?;
            }
        }

        let tmp = self.temp_path();
        let tmp_display = tmp.display().to_string();
        {
            let mut file = File::create(&tmp).map_err(|e| StorageError::io(&tmp_display, e))?;
            file.write_all(bytes)
                .map_err(|e| StorageError::io(&tmp_display, e))?;
            file.sync_all()
                .map_err(|e| StorageError::io(&tmp_display, e))?;
        }

        if self.keep_backup && self.path.exists() {
            let backup = self.backup_path();
            if let Err(e) = fs::copy(&self.path, &backup) {
                tracing::warn!(
                    backup = %backup.display(),
                    error = %e,
                    "failed to refresh ledger backup"
                );
            }
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::io(self.display(), e));
        }

        sync_parent_dir(&self.path);
        Ok(())
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> LoadOutcome {
        if !self.path.exists() {
            self.set_unreadable(None);
            tracing::info!(path = %self.path.display(), "no ledger document; starting empty");
            return LoadOutcome::missing();
        }

        match self.read_document() {
            Ok(state) => {
                tracing::info!(
                    path = %self.path.display(),
                    current = state.current_vehicles.len(),
                    history = state.history.len(),
                    "loaded ledger document"
                );
                self.set_unreadable(None);
                LoadOutcome::loaded(state)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ledger document unreadable; starting empty"
                );
                if matches!(e, StorageError::Malformed { .. }) && self.quarantine() {
                    self.set_unreadable(None);
                } else {
                    self.set_unreadable(Some(e.to_string()));
                }
                LoadOutcome::recovered(e.to_string())
            }
        }
    }

    fn save(&self, state: &LedgerState) -> Result<(), StorageError> {
        if let Some(reason) = self.save_blocked() {
            return Err(StorageError::io(
                self.display(),
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("refusing to replace a document that failed to load: {reason}"),
                ),
            ));
        }
        let document = LedgerDocument::from_state(state);
        let bytes = serde_json::to_vec_pretty(&document).map_err(|e| StorageError::Serialize {
            message: e.to_string(),
        })?;
        self.write_atomically(&bytes)?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "saved ledger document");
        Ok(())
    }

    fn location(&self) -> String {
        self.display()
    }
}

/// `<dir>/<name>.<suffix>` next to `path`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Persist the rename itself. Best effort: not every platform can open a
/// directory for syncing.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}
