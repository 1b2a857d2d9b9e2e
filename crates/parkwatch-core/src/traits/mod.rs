//! Trait seams between the ledger and its collaborators.

pub mod store;

pub use store::{LedgerStore, LoadOutcome, LoadReport};
