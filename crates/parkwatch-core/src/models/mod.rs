//! Ledger data model: sessions, aggregate state, and call results.

pub mod result;
pub mod session;
pub mod state;
pub mod statistics;

pub use result::{ClearOutcome, ClearScope, Durability, ParkingAction, RecognitionResult};
pub use session::{ActiveSession, CompletedSession, CurrentVehicle};
pub use state::LedgerState;
pub use statistics::LedgerStatistics;
