//! ParkwatchErrorCode trait for structured error reporting at the edges.

/// Every error enum provides a stable, machine-readable code string so the
/// CLI and embedding callers can branch on it without matching on messages.
pub trait ParkwatchErrorCode {
    /// Returns the error code string (e.g., "INVALID_PLATE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_PLATE: &str = "INVALID_PLATE";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DOCUMENT_MALFORMED: &str = "DOCUMENT_MALFORMED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
