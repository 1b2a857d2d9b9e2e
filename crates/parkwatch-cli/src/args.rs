use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// parkwatch: parking ledger driven by plate recognitions
#[derive(Debug, Parser)]
#[command(
    name = "parkwatch",
    about = "Classify plate recognitions into parking sessions",
    version
)]
pub struct Cli {
    /// Ledger document to use (overrides config and PARKWATCH_DATA_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Project directory holding parkwatch.toml
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub config: PathBuf,

    /// Keep a copy of the previous document as <data>.bak
    #[arg(long, global = true)]
    pub keep_backup: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record one plate recognition
    Record {
        /// Recognized plate
        #[arg(name = "PLATE")]
        plate: String,

        /// Recognition time (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,
    },

    /// List vehicles currently parked
    Current {
        /// Reference time for elapsed durations (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<DateTime<Utc>>,
    },

    /// List completed sessions, latest exit first
    History {
        /// Maximum number of sessions to list
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show aggregate statistics
    Stats,

    /// Forget one plate's active session and count, or everything
    Clear {
        /// Plate to clear; clears the whole ledger when omitted
        #[arg(name = "PLATE")]
        plate: Option<String>,
    },
}

impl Cli {
    /// Config-layer overrides carried by the global flags. Unset flags leave
    /// lower layers in charge.
    pub fn overrides(&self) -> parkwatch_core::config::CliOverrides {
        parkwatch_core::config::CliOverrides {
            data_file: self.data.as_ref().map(|p| p.display().to_string()),
            keep_backup: self.keep_backup.then_some(true),
            log_json: self.log_json.then_some(true),
        }
    }
}

/// Parse an RFC 3339 timestamp and normalize it to UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp like 2024-05-01T08:00:00Z: {e}"))
}
