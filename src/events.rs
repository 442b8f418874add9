//! Dining events.
//!
//! Every state change of a philosopher is described by a [`DiningEvent`] and
//! handed to an [`EventSink`]. Events are an observability side channel: a sink
//! can never block or fail a dinner. Sinks that write somewhere keep the first
//! write error and report it after the run.
//!
//! # Event Format
//!
//! The NDJSON log holds one JSON object per line:
//! - `ts`: RFC3339 timestamp
//! - `philosopher`: Name of the philosopher
//! - `action`: seated, took_fork, eating, thinking, put_down_forks, left_table
//! - `fork`: Fork id for `took_fork`
//! - `round`: 1-based round number for per-round actions

use crate::error::{Result, SymposiumError};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// What a philosopher just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiningAction {
    /// Arrived at the seating barrier.
    Seated,
    /// Picked up one fork.
    TookFork,
    /// Holding every fork it needs; eating starts.
    Eating,
    /// Done eating, still holding the forks.
    Thinking,
    /// Forks are back on the table.
    PutDownForks,
    /// All rounds finished.
    LeftTable,
}

impl std::fmt::Display for DiningAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiningAction::Seated => write!(f, "seated"),
            DiningAction::TookFork => write!(f, "took_fork"),
            DiningAction::Eating => write!(f, "eating"),
            DiningAction::Thinking => write!(f, "thinking"),
            DiningAction::PutDownForks => write!(f, "put_down_forks"),
            DiningAction::LeftTable => write!(f, "left_table"),
        }
    }
}

/// A single dining event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningEvent {
    /// When the event occurred.
    pub ts: DateTime<Utc>,

    /// Who it happened to.
    pub philosopher: String,

    pub action: DiningAction,

    /// Fork id, for `took_fork`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork: Option<usize>,

    /// 1-based round number, for per-round actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
}

impl DiningEvent {
    pub fn new(philosopher: impl Into<String>, action: DiningAction) -> Self {
        Self {
            ts: Utc::now(),
            philosopher: philosopher.into(),
            action,
            fork: None,
            round: None,
        }
    }

    pub fn with_fork(mut self, fork: usize) -> Self {
        self.fork = Some(fork);
        self
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            SymposiumError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Receiver for dining events.
///
/// Called synchronously from philosopher threads, possibly while forks are
/// held, so implementations must be quick and must not block on other
/// philosophers.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &DiningEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: &DiningEvent) {}
}

/// Keeps every event in memory, in the order they were recorded.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiningEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<DiningEvent> {
        self.events.lock().clone()
    }

    /// Events recorded for one philosopher.
    pub fn events_for(&self, philosopher: &str) -> Vec<DiningEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.philosopher == philosopher)
            .cloned()
            .collect()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &DiningEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Appends events to an NDJSON file.
#[derive(Debug)]
pub struct NdjsonSink {
    path: PathBuf,
    state: Mutex<NdjsonState>,
}

#[derive(Debug)]
struct NdjsonState {
    file: File,
    error: Option<String>,
}

impl NdjsonSink {
    /// Open `path` for appending, creating it and its parent directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                SymposiumError::UserError(format!(
                    "failed to create events directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                SymposiumError::UserError(format!(
                    "failed to open events file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(NdjsonState { file, error: None }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush to disk and report the first write error, if any.
    pub fn finish(&self) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(err) = state.error.take() {
            return Err(SymposiumError::UserError(err));
        }
        state.file.sync_all().map_err(|e| {
            SymposiumError::UserError(format!(
                "failed to sync events file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl EventSink for NdjsonSink {
    fn record(&self, event: &DiningEvent) {
        let mut state = self.state.lock();
        if state.error.is_some() {
            return;
        }

        let written = event
            .to_ndjson_line()
            .and_then(|line| {
                writeln!(state.file, "{}", line).map_err(|e| {
                    SymposiumError::UserError(format!(
                        "failed to write event to '{}': {}",
                        self.path.display(),
                        e
                    ))
                })
            });

        if let Err(e) = written {
            warn!(path = %self.path.display(), error = %e, "event log disabled");
            state.error = Some(e.to_string());
        }
    }
}

/// Read an NDJSON event log back.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<DiningEvent>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        SymposiumError::UserError(format!(
            "failed to read events file '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                SymposiumError::UserError(format!(
                    "failed to parse event on line {} of '{}': {}",
                    i + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
