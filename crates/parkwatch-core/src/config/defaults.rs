// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DATA_FILE: &str = "parking_data.json";
pub const DEFAULT_KEEP_BACKUP: bool = false;

// --- Ledger ---
pub const DEFAULT_HISTORY_LIMIT: Option<usize> = None;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;

pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
