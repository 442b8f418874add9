//! Symposium: deadlock-free dining coordinator.
//!
//! N philosophers share a table of forks; each needs two forks to eat. Every
//! philosopher picks up its lower-numbered fork first, which rules out a
//! circular wait, so a dinner always finishes. A seating barrier makes the
//! whole table start contending at once, and a completion collector tells the
//! table who has left.
//!
//! ```
//! use symposium::events::NoopSink;
//! use symposium::table::{DinnerSettings, Table};
//! use symposium::topology::Topology;
//!
//! let table = Table::new(Topology::classic(), DinnerSettings::default())?;
//! let report = table.dine(&NoopSink)?;
//! assert_eq!(report.completed.len(), 5);
//! # Ok::<(), symposium::error::SymposiumError>(())
//! ```

pub mod barrier;
pub mod collector;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod forks;
pub mod logging;
pub mod philosopher;
pub mod table;
pub mod topology;
