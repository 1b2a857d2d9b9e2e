//! In-process store for tests and embedding.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use parkwatch_core::errors::StorageError;
use parkwatch_core::models::LedgerState;
use parkwatch_core::traits::{LedgerStore, LoadOutcome};

const MEMORY_LOCATION: &str = "memory";

/// Keeps the last saved `LedgerState` in memory.
///
/// Saves can be made to fail on demand to exercise degraded durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<LedgerState>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose first load returns `state`.
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (`true`) or succeed (`false`).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// The most recently saved state, if any.
    pub fn last_saved(&self) -> Option<LedgerState> {
        self.saved.lock().ok().and_then(|guard| guard.clone())
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> LoadOutcome {
        match self.saved.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(state) => LoadOutcome::loaded(state.clone()),
                None => LoadOutcome::missing(),
            },
            Err(_) => LoadOutcome::recovered("memory store lock poisoned"),
        }
    }

    fn save(&self, state: &LedgerState) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(unavailable("saves disabled"));
        }
        let mut guard = self
            .saved
            .lock()
            .map_err(|_| unavailable("memory store lock poisoned"))?;
        *guard = Some(state.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        MEMORY_LOCATION.to_string()
    }
}

fn unavailable(reason: &str) -> StorageError {
    StorageError::io(MEMORY_LOCATION, io::Error::new(io::ErrorKind::Other, reason))
}
