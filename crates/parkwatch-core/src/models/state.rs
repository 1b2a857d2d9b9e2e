//! LedgerState, the unit of persistence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ActiveSession, CompletedSession};

/// Active sessions, per-plate recognition counters, and completed history.
///
/// Map iteration order carries no meaning; `history` is in exit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub current_vehicles: BTreeMap<String, ActiveSession>,
    pub recognition_count: BTreeMap<String, u64>,
    pub history: Vec<CompletedSession>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of every plate's recognition count.
    pub fn total_recognitions(&self) -> u64 {
        self.recognition_count
            .values()
            .fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    pub fn is_empty(&self) -> bool {
        self.current_vehicles.is_empty()
            && self.recognition_count.is_empty()
            && self.history.is_empty()
    }

    /// Drop everything, history included.
    pub fn reset(&mut self) {
        self.current_vehicles.clear();
        self.recognition_count.clear();
        self.history.clear();
    }
}
