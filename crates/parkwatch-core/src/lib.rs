//! # parkwatch-core
//!
//! Foundation crate for the parkwatch parking ledger.
//! Defines the ledger models, the store trait, errors, config, tracing
//! setup, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod duration;
pub mod errors;
pub mod models;
pub mod plate;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ParkwatchConfig;
pub use errors::{ConfigError, LedgerError, ParkwatchErrorCode, StorageError};
pub use models::{
    ActiveSession, ClearOutcome, ClearScope, CompletedSession, CurrentVehicle, Durability,
    LedgerState, LedgerStatistics, ParkingAction, RecognitionResult,
};
pub use traits::{LedgerStore, LoadOutcome, LoadReport};
