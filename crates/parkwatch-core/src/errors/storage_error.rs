//! Persistence-store errors.

use super::error_code::{self, ParkwatchErrorCode};

/// Errors raised while reading or writing the ledger document.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize ledger document: {message}")]
    Serialize { message: String },

    #[error("malformed ledger document {path}: {details}")]
    Malformed { path: String, details: String },
}

impl StorageError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl ParkwatchErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => error_code::DOCUMENT_MALFORMED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
