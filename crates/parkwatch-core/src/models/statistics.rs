//! Aggregate ledger statistics.

use chrono::Duration;
use serde::Serialize;

use super::LedgerState;
use crate::duration::{format_duration, from_total_nanos, serde_nanos, total_nanos};

/// Snapshot of ledger-wide counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStatistics {
    /// Number of completed parkings in history.
    pub completed_count: usize,
    /// Number of vehicles currently parked.
    pub current_count: usize,
    /// Mean completed duration; zero when history is empty.
    #[serde(rename = "average_duration_nanos", with = "serde_nanos")]
    pub average_duration: Duration,
    pub average_duration_formatted: String,
    /// Sum of all per-plate recognition counts.
    pub total_recognitions: u64,
}

impl LedgerStatistics {
    pub fn from_state(state: &LedgerState) -> Self {
        let completed_count = state.history.len();
        let average_duration = average(state);
        Self {
            completed_count,
            current_count: state.current_vehicles.len(),
            average_duration,
            average_duration_formatted: format_duration(average_duration),
            total_recognitions: state.total_recognitions(),
        }
    }
}

/// Exact mean over nanoseconds, accumulated in i128. The mean never exceeds
/// the largest member in magnitude, so it always converts back.
fn average(state: &LedgerState) -> Duration {
    if state.history.is_empty() {
        return Duration::zero();
    }
    let total: i128 = state.history.iter().map(|s| total_nanos(s.duration)).sum();
    let mean = total / state.history.len() as i128;
    from_total_nanos(mean).unwrap_or_else(Duration::zero)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::ActiveSession;

    #[test]
    fn empty_state_averages_to_zero() {
        let stats = LedgerStatistics::from_state(&LedgerState::new());
        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.average_duration, Duration::zero());
        assert_eq!(stats.average_duration_formatted, "0h0m0s");
    }

    #[test]
    fn averages_completed_durations() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut state = LedgerState::new();
        state
            .history
            .push(ActiveSession::new("A", t0).close(t0 + Duration::hours(2)));
        state
            .history
            .push(ActiveSession::new("B", t0).close(t0 + Duration::hours(3)));
        state.recognition_count.insert("A".into(), 2);
        state.recognition_count.insert("B".into(), 3);

        let stats = LedgerStatistics::from_state(&state);
        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.average_duration, Duration::minutes(150));
        assert_eq!(stats.average_duration_formatted, "2h30m0s");
        assert_eq!(stats.total_recognitions, 5);
    }

    #[test]
    fn averages_sessions_spanning_centuries() {
        let t0 = Utc.with_ymd_and_hms(1700, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2300, 1, 1, 0, 0, 0).unwrap();
        let mut state = LedgerState::new();
        state.history.push(ActiveSession::new("A", t0).close(t1));
        state.history.push(ActiveSession::new("B", t0).close(t1));

        let stats = LedgerStatistics::from_state(&state);
        assert_eq!(stats.average_duration, t1 - t0);
        assert_eq!(stats.average_duration.num_seconds(), 18_934_128_000);
        assert_eq!(stats.average_duration_formatted, "5259480h0m0s");

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"average_duration_nanos\":18934128000000000000"));
    }
}
