//! ParkingLedger, the single owner of `LedgerState`.
//!
//! Every call takes the same mutex, so classify → mutate → flush runs as one
//! critical section and readers always see a consistent state.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use parkwatch_core::config::LedgerConfig;
use parkwatch_core::errors::LedgerError;
use parkwatch_core::models::{
    ActiveSession, ClearOutcome, ClearScope, CompletedSession, CurrentVehicle, Durability,
    LedgerState, LedgerStatistics, ParkingAction, RecognitionResult,
};
use parkwatch_core::plate::normalize_plate;
use parkwatch_core::traits::{LedgerStore, LoadReport};
use parkwatch_core::{flush_span, query_span, recognition_span};

use crate::classifier::{Direction, RecognitionClassifier};

/// Thread-safe parking ledger backed by an injected store.
pub struct ParkingLedger {
    state: Mutex<LedgerState>,
    store: Arc<dyn LedgerStore>,
    classifier: RecognitionClassifier,
    load_report: LoadReport,
    history_default_limit: Option<usize>,
}

impl ParkingLedger {
    /// Load state from `store` and take ownership of it.
    pub fn open(store: Arc<dyn LedgerStore>) -> Self {
        Self::with_config(store, &LedgerConfig::default())
    }

    pub fn with_config(store: Arc<dyn LedgerStore>, config: &LedgerConfig) -> Self {
        let outcome = store.load();
        if let LoadReport::Recovered { ref reason } = outcome.report {
            tracing::warn!(
                location = %store.location(),
                reason = %reason,
                "ledger started empty after discarding an unreadable document"
            );
        }
        Self {
            state: Mutex::new(outcome.state),
            store,
            classifier: RecognitionClassifier,
            load_report: outcome.report,
            history_default_limit: config.history_default_limit,
        }
    }

    /// How the initial state was obtained.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Apply one recognition event.
    ///
    /// Odd occurrences open a session (overwriting a stale one), even
    /// occurrences close it. An even occurrence with nothing to close yields
    /// `ExitNoMatch`. The state is flushed before returning; a failed flush
    /// is reported through `durability`, not as an error.
    pub fn process_plate_recognition(
        &self,
        plate_number: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<RecognitionResult, LedgerError> {
        let plate = normalize_plate(plate_number)?;
        let span = recognition_span!(plate, timestamp);
        let _enter = span.enter();

        let mut state = self.lock()?;
        let classification = self.classifier.classify(&mut state.recognition_count, &plate);

        let mut result = match classification.direction {
            Direction::Entry => Self::apply_entry(&mut state, &plate, timestamp, classification.count),
            Direction::Exit => Self::apply_exit(&mut state, &plate, timestamp, classification.count),
        };
        result.durability = self.persist(&state);
        drop(state);

        match result.action {
            ParkingAction::Entry => tracing::info!(
                plate = %plate,
                count = result.recognition_count,
                "vehicle entered"
            ),
            ParkingAction::Exit => tracing::info!(
                plate = %plate,
                count = result.recognition_count,
                duration = result.duration_formatted.as_deref().unwrap_or_default(),
                "vehicle exited"
            ),
            ParkingAction::ExitNoMatch => tracing::warn!(
                plate = %plate,
                count = result.recognition_count,
                "exit without a matching entry"
            ),
        }
        Ok(result)
    }

    fn apply_entry(
        state: &mut LedgerState,
        plate: &str,
        timestamp: DateTime<Utc>,
        count: u64,
    ) -> RecognitionResult {
        let replaced = state
            .current_vehicles
            .insert(plate.to_string(), ActiveSession::new(plate, timestamp));
        let replaced_entry = replaced.map(|session| session.entry_time);
        if let Some(previous) = replaced_entry {
            tracing::warn!(
                plate = %plate,
                previous_entry = %previous,
                "active session overwritten by a repeated entry"
            );
        }

        RecognitionResult {
            action: ParkingAction::Entry,
            plate_number: plate.to_string(),
            time: timestamp,
            recognition_count: count,
            entry_time: Some(timestamp),
            exit_time: None,
            duration: None,
            duration_formatted: None,
            replaced_entry,
            message: RecognitionResult::entry_message(plate, &timestamp),
            durability: Durability::Persisted,
        }
    }

    fn apply_exit(
        state: &mut LedgerState,
        plate: &str,
        timestamp: DateTime<Utc>,
        count: u64,
    ) -> RecognitionResult {
        let Some(session) = state.current_vehicles.remove(plate) else {
            return RecognitionResult {
                action: ParkingAction::ExitNoMatch,
                plate_number: plate.to_string(),
                time: timestamp,
                recognition_count: count,
                entry_time: None,
                exit_time: Some(timestamp),
                duration: None,
                duration_formatted: None,
                replaced_entry: None,
                message: RecognitionResult::no_match_message(plate, &timestamp),
                durability: Durability::Persisted,
            };
        };

        let completed = session.close(timestamp);
        let formatted = completed.duration_formatted();
        let result = RecognitionResult {
            action: ParkingAction::Exit,
            plate_number: plate.to_string(),
            time: timestamp,
            recognition_count: count,
            entry_time: Some(completed.entry_time),
            exit_time: Some(completed.exit_time),
            duration: Some(completed.duration),
            message: RecognitionResult::exit_message(plate, &timestamp, &formatted),
            duration_formatted: Some(formatted),
            replaced_entry: None,
            durability: Durability::Persisted,
        };
        state.history.push(completed);
        result
    }

    /// Vehicles currently parked, oldest entry first, with time parked as
    /// of `now`.
    pub fn get_current_vehicles(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<CurrentVehicle>, LedgerError> {
        let _span = query_span!("current_vehicles").entered();
        let state = self.lock()?;
        let mut sessions: Vec<&ActiveSession> = state.current_vehicles.values().collect();
        sessions.sort_by(|a, b| {
            a.entry_time
                .cmp(&b.entry_time)
                .then_with(|| a.plate_number.cmp(&b.plate_number))
        });
        let vehicles: Vec<CurrentVehicle> = sessions
            .into_iter()
            .map(|s| CurrentVehicle::from_session(s, now))
            .collect();
        tracing::debug!(count = vehicles.len(), "listed current vehicles");
        Ok(vehicles)
    }

    /// Completed sessions, latest exit first. Equal exit times list the
    /// most recently recorded first. `None` falls back to the configured
    /// default limit.
    pub fn get_parking_history(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<CompletedSession>, LedgerError> {
        let _span = query_span!("parking_history").entered();
        let state = self.lock()?;
        let mut history: Vec<CompletedSession> = state.history.iter().rev().cloned().collect();
        history.sort_by(|a, b| b.exit_time.cmp(&a.exit_time));
        if let Some(limit) = limit.or(self.history_default_limit) {
            history.truncate(limit);
        }
        tracing::debug!(count = history.len(), "listed parking history");
        Ok(history)
    }

    pub fn get_statistics(&self) -> Result<LedgerStatistics, LedgerError> {
        let _span = query_span!("statistics").entered();
        let state = self.lock()?;
        Ok(LedgerStatistics::from_state(&state))
    }

    /// Current occurrence count for `plate` (zero if never seen).
    pub fn recognition_count(&self, plate_number: &str) -> Result<u64, LedgerError> {
        let plate = normalize_plate(plate_number)?;
        let state = self.lock()?;
        Ok(state.recognition_count.get(&plate).copied().unwrap_or(0))
    }

    /// A clone of the full state.
    pub fn snapshot(&self) -> Result<LedgerState, LedgerError> {
        Ok(self.lock()?.clone())
    }

    /// Remove one plate's active session and counter, keeping its history;
    /// or, with no plate, remove everything including history. Flushed like
    /// any other mutation.
    pub fn clear(&self, plate_number: Option<&str>) -> Result<ClearOutcome, LedgerError> {
        let plate = plate_number.map(normalize_plate).transpose()?;
        let mut state = self.lock()?;

        let mut outcome = match plate {
            Some(plate) => {
                let removed_active = state.current_vehicles.remove(&plate).is_some();
                let removed_count = state.recognition_count.remove(&plate).unwrap_or(0);
                ClearOutcome {
                    scope: ClearScope::Plate(plate),
                    removed_active,
                    removed_count,
                    removed_history: 0,
                    durability: Durability::Persisted,
                }
            }
            None => {
                let outcome = ClearOutcome {
                    scope: ClearScope::All,
                    removed_active: !state.current_vehicles.is_empty(),
                    removed_count: state.total_recognitions(),
                    removed_history: state.history.len(),
                    durability: Durability::Persisted,
                };
                state.reset();
                outcome
            }
        };
        outcome.durability = self.persist(&state);
        drop(state);

        tracing::info!(
            scope = ?outcome.scope,
            removed_active = outcome.removed_active,
            removed_count = outcome.removed_count,
            removed_history = outcome.removed_history,
            "ledger cleared"
        );
        Ok(outcome)
    }

    /// Write the current state to the store, surfacing any failure. Used to
    /// catch up after a degraded flush.
    pub fn flush(&self) -> Result<(), LedgerError> {
        let state = self.lock()?;
        let _span = flush_span!(self.store.location()).entered();
        self.store.save(&state)?;
        Ok(())
    }

    fn persist(&self, state: &LedgerState) -> Durability {
        let _span = flush_span!(self.store.location()).entered();
        match self.store.save(state) {
            Ok(()) => Durability::Persisted,
            Err(e) => {
                tracing::warn!(
                    location = %self.store.location(),
                    error = %e,
                    "ledger flush failed; in-memory state kept"
                );
                Durability::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>, LedgerError> {
        self.state.lock().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl std::fmt::Debug for ParkingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkingLedger")
            .field("store", &self.store.location())
            .field("load_report", &self.load_report)
            .finish_non_exhaustive()
    }
}

