//! Dispatch of parsed subcommands onto a `ParkingLedger`.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use parkwatch_core::config::ParkwatchConfig;
use parkwatch_ledger::ParkingLedger;
use parkwatch_storage::JsonFileStore;

use crate::args::{Cli, Command};
use crate::output;

/// Resolve configuration for `cli`.
pub fn load_config(cli: &Cli) -> Result<ParkwatchConfig> {
    ParkwatchConfig::load(&cli.config, Some(&cli.overrides()))
        .with_context(|| format!("loading configuration from {}", cli.config.display()))
}

/// Open the ledger document named by `config`.
pub fn open_ledger(config: &ParkwatchConfig) -> ParkingLedger {
    let store = JsonFileStore::new(&config.storage.data_file).with_backup(config.storage.keep_backup);
    ParkingLedger::with_config(Arc::new(store), &config.ledger)
}

/// Run `command` against `ledger`, writing results to `out`. `clock` is
/// used only when the command carries no explicit time.
pub fn run(
    ledger: &ParkingLedger,
    command: Command,
    json: bool,
    clock: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Record { plate, at } => {
            let result = ledger.process_plate_recognition(&plate, at.unwrap_or(clock))?;
            if result.is_anomaly() {
                eprintln!("warning: {}", result.message);
            }
            output::warn_degraded(&result.durability);
            if json {
                output::json(out, &result)
            } else {
                output::recognition(out, &result)
            }
        }
        Command::Current { now } => {
            let vehicles = ledger.get_current_vehicles(now.unwrap_or(clock))?;
            if json {
                output::json(out, &vehicles)
            } else {
                output::current(out, &vehicles)
            }
        }
        Command::History { limit } => {
            let history = ledger.get_parking_history(limit)?;
            if json {
                output::json(out, &history)
            } else {
                output::history(out, &history)
            }
        }
        Command::Stats => {
            let stats = ledger.get_statistics()?;
            if json {
                output::json(out, &stats)
            } else {
                output::statistics(out, &stats)
            }
        }
        Command::Clear { plate } => {
            let outcome = ledger.clear(plate.as_deref())?;
            output::warn_degraded(&outcome.durability);
            if json {
                output::json(out, &outcome)
            } else {
                output::cleared(out, &outcome)
            }
        }
    }
}
