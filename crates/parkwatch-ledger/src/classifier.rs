//! Recognition classifier: occurrence-count parity decides entry vs. exit.

use std::collections::BTreeMap;

/// Direction implied by a plate's occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Entry,
    Exit,
}

impl Direction {
    /// Odd counts enter, even counts exit.
    pub fn from_count(count: u64) -> Self {
        if count % 2 == 1 {
            Self::Entry
        } else {
            Self::Exit
        }
    }
}

/// A classified recognition: the direction and the count it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub direction: Direction,
    pub count: u64,
}

/// Stateless classifier over a caller-owned counter map.
///
/// No confidence or quality filtering happens here; callers drop bad reads
/// before they reach the ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecognitionClassifier;

impl RecognitionClassifier {
    /// Increment `plate`'s count, then classify by the new count.
    pub fn classify(&self, counts: &mut BTreeMap<String, u64>, plate: &str) -> Classification {
        let count = counts.entry(plate.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        Classification {
            direction: Direction::from_count(*count),
            count: *count,
        }
    }
}
