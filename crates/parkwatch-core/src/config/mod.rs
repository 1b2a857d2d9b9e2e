//! Configuration system for parkwatch.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod defaults;
pub mod ledger_config;
pub mod observability_config;
pub mod parkwatch_config;
pub mod storage_config;

pub use ledger_config::LedgerConfig;
pub use observability_config::ObservabilityConfig;
pub use parkwatch_config::{CliOverrides, ParkwatchConfig};
pub use storage_config::StorageConfig;
