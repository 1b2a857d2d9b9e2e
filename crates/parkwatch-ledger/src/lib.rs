//! # parkwatch-ledger
//!
//! Turns `(plate, timestamp)` recognition events into parking sessions.
//! The n-th sighting of a plate is an entry when n is odd and an exit when
//! n is even; every mutation is flushed to the injected `LedgerStore`
//! before the call returns.

pub mod classifier;
pub mod ledger;

pub use classifier::{Classification, Direction, RecognitionClassifier};
pub use ledger::ParkingLedger;
