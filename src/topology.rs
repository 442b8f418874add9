//! Seating plan for a dinner.
//!
//! A topology is an ordered list of seats. Each seat names a philosopher and
//! the two forks within reach. Fork ids are dense integers starting at 0; the
//! fork pool is sized to the number of distinct ids.
//!
//! The canonical table is a ring: philosopher `i` shares its right fork with
//! philosopher `i + 1` and its left fork with philosopher `i - 1`.

use crate::error::{Result, SymposiumError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Names used by [`Topology::classic`].
pub const CLASSIC_NAMES: [&str; 5] = ["Plato", "Socrates", "Aristotle", "Pascal", "Locke"];

/// One place at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Philosopher identity; also the completion token.
    pub name: String,

    /// Fork id on the left-hand side.
    pub left: usize,

    /// Fork id on the right-hand side.
    pub right: usize,
}

impl Seat {
    pub fn new(name: impl Into<String>, left: usize, right: usize) -> Self {
        Self {
            name: name.into(),
            left,
            right,
        }
    }

    /// Forks in pick-up order: lower id first.
    ///
    /// A seat whose left and right forks are the same yields a single fork.
    pub fn pickup_order(&self) -> (usize, Option<usize>) {
        match self.left.cmp(&self.right) {
            std::cmp::Ordering::Less => (self.left, Some(self.right)),
            std::cmp::Ordering::Greater => (self.right, Some(self.left)),
            std::cmp::Ordering::Equal => (self.left, None),
        }
    }

    /// Whether this seat reaches the given fork.
    pub fn uses(&self, fork: usize) -> bool {
        self.left == fork || self.right == fork
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (left: {}, right: {})", self.name, self.left, self.right)
    }
}

/// Ordered list of seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    seats: Vec<Seat>,
}

impl Topology {
    /// Build a topology from explicit seats. Call [`Topology::validate`] before use.
    pub fn new(seats: Vec<Seat>) -> Self {
        Self { seats }
    }

    /// Build a ring where seat `i` holds forks `(i + n - 1) % n` and `i`.
    ///
    /// A ring of one has a single fork on both sides.
    pub fn ring<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let n = names.len();
        let seats = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Seat::new(name, (i + n - 1) % n, i))
            .collect();
        Self { seats }
    }

    /// Ring of `n` philosophers named `philosopher-0` .. `philosopher-{n-1}`.
    pub fn numbered_ring(n: usize) -> Self {
        Self::ring((0..n).map(|i| format!("philosopher-{}", i)))
    }

    /// The five-philosopher table: Plato, Socrates, Aristotle, Pascal, Locke.
    pub fn classic() -> Self {
        Self::ring(CLASSIC_NAMES)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Number of philosophers.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Number of distinct fork ids referenced by the seats.
    pub fn fork_count(&self) -> usize {
        self.seats
            .iter()
            .flat_map(|s| [s.left, s.right])
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Philosopher names in seating order.
    pub fn names(&self) -> Vec<&str> {
        self.seats.iter().map(|s| s.name.as_str()).collect()
    }

    /// Validate the seating plan.
    ///
    /// Validation rules:
    /// - at least one seat
    /// - names are non-empty, unique and free of control characters (they
    ///   become thread names)
    /// - every fork id is below [`Topology::fork_count`] (ids are dense from 0)
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(SymposiumError::InvalidTopology(
                "the table has no seats".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for seat in &self.seats {
            if seat.name.trim().is_empty() {
                return Err(SymposiumError::InvalidTopology(
                    "philosopher names must be non-empty".to_string(),
                ));
            }
            if seat.name.chars().any(char::is_control) {
                return Err(SymposiumError::InvalidTopology(format!(
                    "philosopher name {:?} contains control characters",
                    seat.name
                )));
            }
            if !seen.insert(seat.name.as_str()) {
                return Err(SymposiumError::InvalidTopology(format!(
                    "duplicate philosopher name '{}'",
                    seat.name
                )));
            }
        }

        let forks = self.fork_count();
        for seat in &self.seats {
            for fork in [seat.left, seat.right] {
                if fork >= forks {
                    return Err(SymposiumError::InvalidTopology(format!(
                        "{} reaches for fork {}, but fork ids must be dense in 0..{}",
                        seat.name, fork, forks
                    )));
                }
            }
        }

        Ok(())
    }
}
