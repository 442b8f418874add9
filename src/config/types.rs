//! Configuration types and defaults for symposium.

use crate::table::DEFAULT_ROUNDS;
use crate::topology::{Seat, Topology};
use serde::{Deserialize, Serialize};

/// Log levels accepted in `logging.level`.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions for serde
pub(crate) fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}
pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
pub(crate) fn default_philosophers() -> Vec<Seat> {
    Topology::classic().seats().to_vec()
}
