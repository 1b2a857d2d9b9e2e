use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON ledger document.
    pub data_file: String,
    /// Copy the previous document to `<data_file>.bak` before each replace.
    pub keep_backup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: defaults::DEFAULT_DATA_FILE.to_string(),
            keep_backup: defaults::DEFAULT_KEEP_BACKUP,
        }
    }
}
