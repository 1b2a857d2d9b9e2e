//! Ledger errors.
//!
//! Recoverable anomalies (exit without entry, degraded durability) are not
//! errors; they travel inside `RecognitionResult`.

use super::error_code::{self, ParkwatchErrorCode};
use super::StorageError;

/// Conditions that stop a ledger call before it mutates state.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid plate identifier: {raw:?}")]
    InvalidPlate { raw: String },

    #[error("ledger state lock poisoned")]
    LockPoisoned,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ParkwatchErrorCode for LedgerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPlate { .. } => error_code::INVALID_PLATE,
            Self::LockPoisoned => error_code::LOCK_POISONED,
            Self::Storage(e) => e.error_code(),
        }
    }
}
