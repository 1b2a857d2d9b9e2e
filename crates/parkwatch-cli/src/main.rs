//! `parkwatch` command-line driver.
//!
//! # Commands
//!
//! - `parkwatch record <PLATE> [--at <TIME>]` - apply one recognition
//! - `parkwatch current [--now <TIME>]` - vehicles currently parked
//! - `parkwatch history [--limit N]` - completed sessions, latest first
//! - `parkwatch stats` - aggregate counters
//! - `parkwatch clear [<PLATE>]` - forget one plate or everything

mod args;
mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use parkwatch_core::constants::VERSION;
use parkwatch_core::errors::{LedgerError, ParkwatchErrorCode};
use parkwatch_core::tracing::init_tracing_with;

use crate::args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<LedgerError>() {
                Some(ledger_err) => eprintln!("error: {}", ledger_err.coded_string()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = commands::load_config(&cli)?;
    init_tracing_with(&config.observability);
    tracing::debug!(version = VERSION, data_file = %config.storage.data_file, "starting parkwatch");

    let ledger = commands::open_ledger(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&ledger, cli.command, cli.json, chrono::Utc::now(), &mut out)
}
