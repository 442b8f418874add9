//! Logging setup.
//!
//! Status lines ("Plato is seated at the table", ...) go through `tracing`.
//! The subscriber writes to stderr so stdout only carries the dinner result.

use crate::config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the process.
///
/// `RUST_LOG` takes precedence over the configured level. Should be called
/// once at startup; later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let level = config.level.to_lowercase();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let installed = if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_thread_names(true)
                    .with_target(false),
            )
            .try_init()
    };

    if installed.is_ok() {
        tracing::debug!(level = %level, json = config.json, "logging initialized");
    }
}

/// Merge command-line overrides into the configured logging settings.
pub fn with_overrides(base: &LoggingConfig, level: Option<&str>, json: bool) -> LoggingConfig {
    LoggingConfig {
        level: level.map(str::to_string).unwrap_or_else(|| base.level.clone()),
        json: base.json || json,
    }
}
