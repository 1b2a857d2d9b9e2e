use crate::errors::StorageError;
use crate::models::LedgerState;

/// How `LedgerStore::load` arrived at its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// No document existed; state is empty.
    Missing,
    /// The document was decoded in full.
    Loaded,
    /// The document was unreadable and was discarded; state is empty.
    Recovered { reason: String },
}

/// State produced by a load, plus how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub state: LedgerState,
    pub report: LoadReport,
}

impl LoadOutcome {
    pub fn missing() -> Self {
        Self {
            state: LedgerState::default(),
            report: LoadReport::Missing,
        }
    }

    pub fn loaded(state: LedgerState) -> Self {
        Self {
            state,
            report: LoadReport::Loaded,
        }
    }

    pub fn recovered(reason: impl Into<String>) -> Self {
        Self {
            state: LedgerState::default(),
            report: LoadReport::Recovered {
                reason: reason.into(),
            },
        }
    }
}

/// Single-document persistence for the whole `LedgerState`.
///
/// `load` never fails: a missing or malformed document yields empty state
/// and says so in the report. `save` replaces the document atomically.
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> LoadOutcome;
    fn save(&self, state: &LedgerState) -> Result<(), StorageError>;
    /// Where the document lives, for log fields and messages.
    fn location(&self) -> String;
}
