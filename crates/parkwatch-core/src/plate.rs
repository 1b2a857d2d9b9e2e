//! Plate identifier normalization.

use crate::errors::LedgerError;

/// Trim surrounding whitespace from a recognized plate.
///
/// Returns `LedgerError::InvalidPlate` when nothing is left. Plate syntax is
/// owned by the recognition pipeline and is not checked here.
pub fn normalize_plate(raw: &str) -> Result<String, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidPlate {
            raw: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
