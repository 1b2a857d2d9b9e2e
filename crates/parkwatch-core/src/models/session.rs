//! Active and completed parking sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::{format_duration, serde_nanos};

/// A vehicle currently inside the facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub plate_number: String,
    pub entry_time: DateTime<Utc>,
}

impl ActiveSession {
    pub fn new(plate_number: impl Into<String>, entry_time: DateTime<Utc>) -> Self {
        Self {
            plate_number: plate_number.into(),
            entry_time,
        }
    }

    /// Time parked as of `now`. Negative when `now` precedes the entry.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.entry_time
    }

    /// Close this session at `exit_time`, producing the history record.
    pub fn close(self, exit_time: DateTime<Utc>) -> CompletedSession {
        CompletedSession {
            duration: exit_time - self.entry_time,
            plate_number: self.plate_number,
            entry_time: self.entry_time,
            exit_time,
        }
    }
}

/// An immutable entry/exit pair. Only produced by [`ActiveSession::close`]
/// or by decoding a persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSession {
    pub plate_number: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    #[serde(rename = "duration_nanos", with = "serde_nanos")]
    pub duration: Duration,
}

impl CompletedSession {
    /// Human-readable dwell time, e.g. `2h30m0s`.
    pub fn duration_formatted(&self) -> String {
        format_duration(self.duration)
    }
}

/// A row of the current-vehicles query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentVehicle {
    pub plate_number: String,
    pub entry_time: DateTime<Utc>,
    #[serde(rename = "elapsed_nanos", with = "serde_nanos")]
    pub elapsed: Duration,
    pub elapsed_formatted: String,
}

impl CurrentVehicle {
    pub fn from_session(session: &ActiveSession, now: DateTime<Utc>) -> Self {
        let elapsed = session.elapsed(now);
        Self {
            plate_number: session.plate_number.clone(),
            entry_time: session.entry_time,
            elapsed,
            elapsed_formatted: format_duration(elapsed),
        }
    }
}
