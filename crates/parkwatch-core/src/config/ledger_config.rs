use serde::{Deserialize, Serialize};

use super::defaults;

/// Ledger query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// History rows returned when the caller gives no limit. Unbounded when unset.
    pub history_default_limit: Option<usize>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            history_default_limit: defaults::DEFAULT_HISTORY_LIMIT,
        }
    }
}
