//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize tracing with default observability settings.
///
/// Reads `PARKWATCH_LOG` for per-crate log levels, e.g.
/// `PARKWATCH_LOG=parkwatch_ledger=debug,parkwatch_storage=warn`.
pub fn init_tracing() {
    init_tracing_with(&ObservabilityConfig::default());
}

/// Initialize tracing from an `ObservabilityConfig`.
///
/// `PARKWATCH_LOG` wins over `config.log_level` when it parses. Idempotent:
/// only the first call installs a subscriber, and an already-installed
/// global subscriber is left in place.
pub fn init_tracing_with(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_ascii_lowercase()));

        let registry = tracing_subscriber::registry().with(filter);
        let installed = if config.json {
            registry
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if installed.is_err() {
            ::tracing::debug!("global tracing subscriber already set; keeping it");
        }
    });
}
