//! Top-level parkwatch configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults::VALID_LOG_LEVELS;
use super::{LedgerConfig, ObservabilityConfig, StorageConfig};
use crate::constants::CONFIG_FILENAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PARKWATCH_*`)
/// 3. Project config (`parkwatch.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParkwatchConfig {
    pub storage: StorageConfig,
    pub ledger: LedgerConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_file: Option<String>,
    pub keep_backup: Option<bool>,
    pub log_json: Option<bool>,
}

impl ParkwatchConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ParkwatchConfig) -> Result<(), ConfigError> {
        if config.storage.data_file.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.data_file".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let level = config.observability.log_level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("must be one of {}", VALID_LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored and the lower layer wins.
    fn apply_env_overrides(config: &mut ParkwatchConfig) {
        if let Ok(val) = std::env::var("PARKWATCH_DATA_FILE") {
            config.storage.data_file = val;
        }
        if let Ok(val) = std::env::var("PARKWATCH_KEEP_BACKUP") {
            if let Ok(v) = val.parse::<bool>() {
                config.storage.keep_backup = v;
            }
        }
        if let Ok(val) = std::env::var("PARKWATCH_LOG_LEVEL") {
            config.observability.log_level = val;
        }
        if let Ok(val) = std::env::var("PARKWATCH_LOG_JSON") {
            if let Ok(v) = val.parse::<bool>() {
                config.observability.json = v;
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ParkwatchConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.data_file {
            config.storage.data_file = v.clone();
        }
        if let Some(v) = cli.keep_backup {
            config.storage.keep_backup = v;
        }
        if let Some(v) = cli.log_json {
            config.observability.json = v;
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
