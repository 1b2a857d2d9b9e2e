//! Structured results returned by ledger calls.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MESSAGE_TIME_FORMAT;
use crate::duration::serde_nanos;

/// What a recognition event turned out to mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParkingAction {
    Entry,
    Exit,
    /// Even occurrence with no active session to close.
    ExitNoMatch,
}

impl ParkingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "ENTRY",
            Self::Exit => "EXIT",
            Self::ExitNoMatch => "EXIT_NO_MATCH",
        }
    }

    /// True for results the caller should surface as a warning.
    pub fn is_anomaly(&self) -> bool {
        matches!(self, Self::ExitNoMatch)
    }
}

impl std::fmt::Display for ParkingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Whether the state after a mutation reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Durability {
    Persisted,
    /// The in-memory mutation stands; the store lags behind it.
    Degraded { reason: String },
}

impl Durability {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// Outcome of `process_plate_recognition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognitionResult {
    pub action: ParkingAction,
    pub plate_number: String,
    /// The timestamp supplied with the event.
    pub time: DateTime<Utc>,
    /// The plate's occurrence count after this event.
    pub recognition_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(
        rename = "duration_nanos",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_duration"
    )]
    pub duration: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_formatted: Option<String>,
    /// Entry time of an active session displaced by a repeated ENTRY.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_entry: Option<DateTime<Utc>>,
    pub message: String,
    pub durability: Durability,
}

impl RecognitionResult {
    pub fn is_anomaly(&self) -> bool {
        self.action.is_anomaly()
    }

    pub(crate) fn clock(time: &DateTime<Utc>) -> String {
        time.format(MESSAGE_TIME_FORMAT).to_string()
    }

    /// Message for an ENTRY result.
    pub fn entry_message(plate: &str, time: &DateTime<Utc>) -> String {
        format!("plate {plate} entered at {}", Self::clock(time))
    }

    /// Message for a matched EXIT result.
    pub fn exit_message(plate: &str, time: &DateTime<Utc>, formatted: &str) -> String {
        format!("plate {plate} exited at {}, parked {formatted}", Self::clock(time))
    }

    /// Message for an EXIT_NO_MATCH result.
    pub fn no_match_message(plate: &str, time: &DateTime<Utc>) -> String {
        format!(
            "plate {plate} exited at {} but no matching entry was found",
            Self::clock(time)
        )
    }
}

fn serialize_opt_duration<S: serde::Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serde_nanos::serialize(d, serializer),
        None => serializer.serialize_none(),
    }
}

/// Which part of the ledger a `clear` call removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "plate_number", rename_all = "snake_case")]
pub enum ClearScope {
    Plate(String),
    All,
}

/// Outcome of `clear`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearOutcome {
    pub scope: ClearScope,
    /// An active session was removed.
    pub removed_active: bool,
    /// Recognition count dropped (single plate) or summed over all plates.
    pub removed_count: u64,
    /// History records removed; always zero for a single-plate clear.
    pub removed_history: usize,
    pub durability: Durability,
}
