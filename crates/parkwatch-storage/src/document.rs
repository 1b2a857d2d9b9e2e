//! On-disk schema of the ledger document and its conversion to and from
//! `LedgerState`.
//!
//! Field names match documents written by earlier parkwatch deployments, so
//! those still load: naive timestamps are read as UTC and a missing
//! `duration_nanos` is recomputed from the entry and exit times.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use parkwatch_core::duration::{duration_seconds, format_duration};
use parkwatch_core::models::{ActiveSession, CompletedSession, LedgerState};
use parkwatch_core::plate::normalize_plate;

/// The persisted document. Top-level fields default to empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    /// Plate → entry timestamp.
    #[serde(default)]
    pub current_vehicles: BTreeMap<String, String>,
    /// Plate → occurrence count.
    #[serde(default)]
    pub recognition_count: BTreeMap<String, u64>,
    /// Completed sessions in exit order.
    #[serde(default)]
    pub parking_history: Vec<HistoryRecord>,
}

/// One completed session as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub plate_number: String,
    pub entry_time: String,
    pub exit_time: Option<String>,
    /// Informational; `duration_nanos` is authoritative.
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub duration_nanos: Option<i64>,
    #[serde(default)]
    pub duration_formatted: Option<String>,
}

impl LedgerDocument {
    /// Build the document for `state`.
    pub fn from_state(state: &LedgerState) -> Self {
        let current_vehicles = state
            .current_vehicles
            .iter()
            .map(|(plate, session)| (plate.clone(), encode_time(&session.entry_time)))
            .collect();

        let parking_history = state
            .history
            .iter()
            .map(|record| HistoryRecord {
                plate_number: record.plate_number.clone(),
                entry_time: encode_time(&record.entry_time),
                exit_time: Some(encode_time(&record.exit_time)),
                duration_seconds: Some(duration_seconds(record.duration)),
                duration_nanos: record.duration.num_nanoseconds(),
                duration_formatted: Some(format_duration(record.duration)),
            })
            .collect();

        Self {
            current_vehicles,
            recognition_count: state.recognition_count.clone(),
            parking_history,
        }
    }

    /// Decode into a `LedgerState`. Plates are normalized the same way live
    /// recognitions are; two keys that normalize to the same plate are
    /// rejected. Any invalid field rejects the whole document; there is no
    /// partial result.
    pub fn into_state(self) -> Result<LedgerState, String> {
        let mut state = LedgerState::new();

        for (raw, entry) in self.current_vehicles {
            let plate = decode_plate("current_vehicles", &raw)?;
            let entry_time = decode_time(&entry)
                .map_err(|e| format!("current_vehicles[{raw}]: {e}"))?;
            if state.current_vehicles.contains_key(&plate) {
                return Err(format!("current_vehicles lists plate {plate:?} twice"));
            }
            state
                .current_vehicles
                .insert(plate.clone(), ActiveSession::new(plate, entry_time));
        }

        for (raw, count) in self.recognition_count {
            let plate = decode_plate("recognition_count", &raw)?;
            if state.recognition_count.insert(plate.clone(), count).is_some() {
                return Err(format!("recognition_count lists plate {plate:?} twice"));
            }
        }

        for (index, record) in self.parking_history.into_iter().enumerate() {
            state
                .history
                .push(record.into_session().map_err(|e| format!("parking_history[{index}]: {e}"))?);
        }

        Ok(state)
    }
}

fn decode_plate(field: &str, raw: &str) -> Result<String, String> {
    normalize_plate(raw).map_err(|_| format!("{field} contains an empty plate"))
}

impl HistoryRecord {
    fn into_session(self) -> Result<CompletedSession, String> {
        let plate_number =
            normalize_plate(&self.plate_number).map_err(|_| "empty plate_number".to_string())?;
        let entry_time = decode_time(&self.entry_time)?;
        let exit_time = match self.exit_time {
            Some(ref raw) => decode_time(raw)?,
            None => return Err("exit_time is null".to_string()),
        };
        let duration = match self.duration_nanos {
            Some(nanos) => Duration::nanoseconds(nanos),
            None => exit_time - entry_time,
        };
        Ok(CompletedSession {
            plate_number,
            entry_time,
            exit_time,
            duration,
        })
    }
}

/// RFC 3339 in UTC, with only as many fractional digits as needed.
pub fn encode_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse RFC 3339, falling back to a naive ISO-8601 timestamp read as UTC.
pub fn decode_time(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(format!("invalid timestamp {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_without_needless_fraction() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(encode_time(&t), "2024-05-01T08:00:00Z");
    }

    #[test]
    fn keeps_nanoseconds() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::nanoseconds(123_456_789);
        assert_eq!(decode_time(&encode_time(&t)).unwrap(), t);
    }

    #[test]
    fn reads_naive_timestamps_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(decode_time("2024-05-01T08:00:00").unwrap(), expected);
        assert_eq!(
            decode_time("2024-05-01T08:00:00.250000").unwrap(),
            expected + Duration::milliseconds(250)
        );
    }

    #[test]
    fn converts_offsets_to_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(decode_time("2024-05-01T08:00:00+08:00").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(decode_time("yesterday").is_err());
    }

    #[test]
    fn null_exit_time_is_invalid() {
        let doc = LedgerDocument {
            parking_history: vec![HistoryRecord {
                plate_number: "A1".into(),
                entry_time: "2024-05-01T08:00:00Z".into(),
                exit_time: None,
                duration_seconds: None,
                duration_nanos: None,
                duration_formatted: None,
            }],
            ..Default::default()
        };
        assert!(doc.into_state().is_err());
    }

    #[test]
    fn missing_nanos_are_recomputed() {
        let doc = LedgerDocument {
            parking_history: vec![HistoryRecord {
                plate_number: "A1".into(),
                entry_time: "2024-05-01T08:00:00".into(),
                exit_time: Some("2024-05-01T10:30:00".into()),
                duration_seconds: Some(9000.0),
                duration_nanos: None,
                duration_formatted: Some("ignored".into()),
            }],
            ..Default::default()
        };
        let state = doc.into_state().unwrap();
        assert_eq!(state.history[0].duration, Duration::minutes(150));
    }

    #[test]
    fn plate_keys_are_trimmed_on_load() {
        let mut doc = LedgerDocument::default();
        doc.current_vehicles
            .insert(" A1 ".into(), "2024-05-01T08:00:00Z".into());
        doc.recognition_count.insert("A1\n".into(), 3);
        doc.parking_history.push(HistoryRecord {
            plate_number: "\tB2".into(),
            entry_time: "2024-05-01T08:00:00Z".into(),
            exit_time: Some("2024-05-01T09:00:00Z".into()),
            duration_seconds: None,
            duration_nanos: None,
            duration_formatted: None,
        });

        let state = doc.into_state().unwrap();
        assert_eq!(state.current_vehicles["A1"].plate_number, "A1");
        assert_eq!(state.recognition_count.get("A1"), Some(&3));
        assert_eq!(state.history[0].plate_number, "B2");
    }

    #[test]
    fn plates_colliding_after_trim_are_invalid() {
        let mut doc = LedgerDocument::default();
        doc.recognition_count.insert("A1".into(), 1);
        doc.recognition_count.insert(" A1 ".into(), 2);
        assert!(doc.into_state().unwrap_err().contains("twice"));

        let mut doc = LedgerDocument::default();
        doc.current_vehicles
            .insert("A1".into(), "2024-05-01T08:00:00Z".into());
        doc.current_vehicles
            .insert("A1 ".into(), "2024-05-01T09:00:00Z".into());
        assert!(doc.into_state().is_err());
    }

    #[test]
    fn blank_plate_keys_are_invalid() {
        let mut doc = LedgerDocument::default();
        doc.recognition_count.insert("  ".into(), 1);
        assert!(doc.into_state().unwrap_err().contains("empty plate"));
    }
}
