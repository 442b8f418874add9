//! Result of one dinner.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// What the table observed once every philosopher had left.
#[derive(Debug, Clone, Serialize)]
pub struct DinnerReport {
    /// Completion tokens in the order they were drained.
    ///
    /// Threads finish in any order; treat this as a set.
    pub completed: Vec<String>,

    /// Rounds each philosopher was asked to eat.
    pub rounds: u32,

    /// Meals eaten per philosopher.
    pub meals: BTreeMap<String, u32>,

    /// Successful pick-ups per fork, indexed by fork id.
    pub fork_acquisitions: Vec<u64>,

    /// Wall-clock time from the first spawn to the last join.
    pub elapsed_ms: u64,
}

impl DinnerReport {
    /// The completion identities as a set.
    pub fn names(&self) -> BTreeSet<&str> {
        self.completed.iter().map(String::as_str).collect()
    }

    /// Total meals across the table.
    pub fn total_meals(&self) -> u64 {
        self.meals.values().map(|&m| u64::from(m)).sum()
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::error::SymposiumError::UserError(format!("failed to serialize report: {}", e))
        })
    }
}
