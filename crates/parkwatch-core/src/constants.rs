/// parkwatch version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "PARKWATCH_LOG";

/// Project-level configuration file name.
pub const CONFIG_FILENAME: &str = "parkwatch.toml";

/// Suffix of the scratch file written before an atomic replace.
pub const TEMP_SUFFIX: &str = "tmp";

/// Suffix of the previous-document copy kept when backups are enabled.
pub const BACKUP_SUFFIX: &str = "bak";

/// Display format for timestamps in human-readable messages.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock-only display format used inside result messages.
pub const MESSAGE_TIME_FORMAT: &str = "%H:%M:%S";
