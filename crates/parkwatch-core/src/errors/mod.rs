//! Error handling for parkwatch.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod ledger_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::ParkwatchErrorCode;
pub use ledger_error::LedgerError;
pub use storage_error::StorageError;
