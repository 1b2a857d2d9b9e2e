//! Property tests for the ledger's parity and bookkeeping invariants.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use parkwatch_core::models::ParkingAction;
use parkwatch_ledger::ParkingLedger;
use parkwatch_storage::MemoryStore;

fn plate_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["京A12345", "京B67890", "沪C00001", "AB-123", "XYZ9"])
        .prop_map(String::from)
}

/// A sequence of (plate, seconds since the previous event) pairs.
fn events_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec((plate_strategy(), 0i64..7_200), 0..60)
}

proptest! {
    #[test]
    fn prop_actions_alternate_per_plate(events in events_strategy()) {
        let ledger = ParkingLedger::open(Arc::new(MemoryStore::new()));
        let mut now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut seen = std::collections::HashMap::<String, u64>::new();

        for (plate, gap) in &events {
            now += Duration::seconds(*gap);
            let result = ledger.process_plate_recognition(plate, now).unwrap();
            let n = seen.entry(plate.clone()).or_default();
            *n += 1;
            prop_assert_eq!(result.recognition_count, *n);
            if *n % 2 == 1 {
                prop_assert_eq!(result.action, ParkingAction::Entry);
            } else {
                // Fresh ledger: every even sighting has a session to close.
                prop_assert_eq!(result.action, ParkingAction::Exit);
            }
        }
    }

    #[test]
    fn prop_durations_match_timestamps(events in events_strategy()) {
        let ledger = ParkingLedger::open(Arc::new(MemoryStore::new()));
        let mut now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        for (plate, gap) in &events {
            now += Duration::seconds(*gap);
            ledger.process_plate_recognition(plate, now).unwrap();
        }

        let history = ledger.get_parking_history(None).unwrap();
        for session in &history {
            prop_assert_eq!(session.duration, session.exit_time - session.entry_time);
            prop_assert!(session.duration >= Duration::zero());
        }
        for pair in history.windows(2) {
            prop_assert!(pair[0].exit_time >= pair[1].exit_time);
        }
    }

    #[test]
    fn prop_counts_partition_events(events in events_strategy()) {
        let ledger = ParkingLedger::open(Arc::new(MemoryStore::new()));
        let mut now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        for (plate, gap) in &events {
            now += Duration::seconds(*gap);
            ledger.process_plate_recognition(plate, now).unwrap();
        }

        let snapshot = ledger.snapshot().unwrap();
        let stats = ledger.get_statistics().unwrap();
        prop_assert_eq!(stats.total_recognitions, events.len() as u64);
        prop_assert_eq!(
            stats.completed_count + stats.current_count,
            snapshot
                .recognition_count
                .values()
                .map(|c| (c / 2 + c % 2) as usize)
                .sum::<usize>()
        );
        for (plate, count) in &snapshot.recognition_count {
            prop_assert_eq!(snapshot.current_vehicles.contains_key(plate), count % 2 == 1);
        }
    }

    #[test]
    fn prop_reopened_ledger_sees_same_state(events in events_strategy()) {
        let store = Arc::new(MemoryStore::new());
        let ledger = ParkingLedger::open(store.clone());
        let mut now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        for (plate, gap) in &events {
            now += Duration::seconds(*gap);
            ledger.process_plate_recognition(plate, now).unwrap();
        }
        let before = ledger.snapshot().unwrap();
        drop(ledger);

        let reopened = ParkingLedger::open(store);
        prop_assert_eq!(reopened.snapshot().unwrap(), before);
    }
}
