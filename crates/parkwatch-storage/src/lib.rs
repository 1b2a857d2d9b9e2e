//! # parkwatch-storage
//!
//! Persistence stores for the parkwatch ledger. The whole `LedgerState` is
//! one JSON document, written through a temp file and renamed into place.

pub mod document;
pub mod file_store;
pub mod memory_store;

pub use document::LedgerDocument;
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
