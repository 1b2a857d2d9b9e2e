//! Text and JSON rendering of ledger results.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use parkwatch_core::constants::DISPLAY_TIME_FORMAT;
use parkwatch_core::models::{
    ClearOutcome, ClearScope, CompletedSession, CurrentVehicle, Durability, LedgerStatistics,
    RecognitionResult,
};

pub fn json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn recognition(out: &mut dyn Write, result: &RecognitionResult) -> Result<()> {
    writeln!(out, "{:<13} {}", result.action, result.message)?;
    if let Some(previous) = result.replaced_entry {
        writeln!(
            out,
            "{:<13} replaced active session entered {}",
            "",
            previous.format(DISPLAY_TIME_FORMAT)
        )?;
    }
    Ok(())
}

pub fn current(out: &mut dyn Write, vehicles: &[CurrentVehicle]) -> Result<()> {
    if vehicles.is_empty() {
        writeln!(out, "no vehicles parked")?;
        return Ok(());
    }
    writeln!(out, "{:<14} {:<20} {}", "PLATE", "ENTERED", "PARKED")?;
    for v in vehicles {
        writeln!(
            out,
            "{:<14} {:<20} {}",
            v.plate_number,
            v.entry_time.format(DISPLAY_TIME_FORMAT),
            v.elapsed_formatted
        )?;
    }
    Ok(())
}

pub fn history(out: &mut dyn Write, sessions: &[CompletedSession]) -> Result<()> {
    if sessions.is_empty() {
        writeln!(out, "no completed sessions")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<14} {:<20} {:<20} {}",
        "PLATE", "ENTERED", "EXITED", "PARKED"
    )?;
    for s in sessions {
        writeln!(
            out,
            "{:<14} {:<20} {:<20} {}",
            s.plate_number,
            s.entry_time.format(DISPLAY_TIME_FORMAT),
            s.exit_time.format(DISPLAY_TIME_FORMAT),
            s.duration_formatted()
        )?;
    }
    Ok(())
}

pub fn statistics(out: &mut dyn Write, stats: &LedgerStatistics) -> Result<()> {
    writeln!(out, "completed sessions:  {}", stats.completed_count)?;
    writeln!(out, "currently parked:    {}", stats.current_count)?;
    writeln!(out, "average stay:        {}", stats.average_duration_formatted)?;
    writeln!(out, "total recognitions:  {}", stats.total_recognitions)?;
    Ok(())
}

pub fn cleared(out: &mut dyn Write, outcome: &ClearOutcome) -> Result<()> {
    match &outcome.scope {
        ClearScope::Plate(plate) => writeln!(
            out,
            "cleared {plate}: active session {}, {} recognitions dropped",
            if outcome.removed_active { "removed" } else { "none" },
            outcome.removed_count
        )?,
        ClearScope::All => writeln!(
            out,
            "cleared ledger: {} recognitions and {} history records dropped",
            outcome.removed_count, outcome.removed_history
        )?,
    }
    Ok(())
}

/// Warn on stderr when a mutation did not reach the store.
pub fn warn_degraded(durability: &Durability) {
    if let Durability::Degraded { reason } = durability {
        eprintln!("warning: ledger not saved ({reason}); changes are held in memory only");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use parkwatch_core::models::{ActiveSession, ParkingAction};

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn history_rows_show_dwell() {
        let entry = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let session = ActiveSession::new("京A12345", entry).close(entry + Duration::hours(2));
        let text = render(|out| history(out, &[session]));
        assert!(text.contains("京A12345"));
        assert!(text.contains("2024-05-01 08:00:00"));
        assert!(text.contains("2h0m0s"));
    }

    #[test]
    fn empty_current_has_placeholder() {
        assert_eq!(render(|out| current(out, &[])), "no vehicles parked\n");
    }

    #[test]
    fn recognition_line_starts_with_action() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let result = RecognitionResult {
            action: ParkingAction::Entry,
            plate_number: "A1".into(),
            time,
            recognition_count: 1,
            entry_time: Some(time),
            exit_time: None,
            duration: None,
            duration_formatted: None,
            replaced_entry: None,
            message: RecognitionResult::entry_message("A1", &time),
            durability: Durability::Persisted,
        };
        let text = render(|out| recognition(out, &result));
        assert!(text.starts_with("ENTRY"));
        assert!(text.contains("plate A1 entered at 08:00:00"));
    }
}
