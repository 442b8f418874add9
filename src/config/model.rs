//! Config struct definition and default implementation.

use super::types::*;
use crate::topology::Seat;
use serde::{Deserialize, Serialize};

/// Configuration for a dinner.
///
/// This struct represents the contents of `symposium.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Dinner settings
    // =========================================================================
    /// Rounds each philosopher eats.
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Milliseconds spent eating per round.
    #[serde(default)]
    pub eat_time_ms: u64,

    /// Milliseconds spent thinking per round, forks still in hand.
    #[serde(default)]
    pub think_time_ms: u64,

    // =========================================================================
    // Seating plan
    // =========================================================================
    /// Seats in table order.
    #[serde(default = "default_philosophers")]
    pub philosophers: Vec<Seat>,

    // =========================================================================
    // Logging
    // =========================================================================
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            eat_time_ms: 0,
            think_time_ms: 0,
            philosophers: default_philosophers(),
            logging: LoggingConfig::default(),
        }
    }
}
