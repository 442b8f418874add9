//! The table: seats every philosopher and waits for all of them to leave.
//!
//! One dinner builds a fresh fork pool sized to the topology's distinct fork
//! ids, a seating barrier and a completion collector sized to the number of
//! philosophers, then runs one OS thread per philosopher. The shared state is
//! borrowed by scoped threads and dropped when the dinner ends.

mod report;


pub use report::DinnerReport;

use crate::barrier::SeatingBarrier;
use crate::collector::CompletionCollector;
use crate::error::{Result, SymposiumError};
use crate::events::EventSink;
use crate::forks::ForkPool;
use crate::philosopher::Philosopher;
use crate::topology::Topology;
use std::collections::BTreeMap;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Default number of rounds each philosopher eats.
pub const DEFAULT_ROUNDS: u32 = 3;

/// How long and how often everyone eats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DinnerSettings {
    /// Acquire-eat-think-release cycles per philosopher.
    pub rounds: u32,

    /// Time spent eating while holding the forks.
    pub eat_time: Duration,

    /// Time spent thinking, also while holding the forks.
    pub think_time: Duration,
}

impl Default for DinnerSettings {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            eat_time: Duration::ZERO,
            think_time: Duration::ZERO,
        }
    }
}

/// A validated seating plan ready to dine.
#[derive(Debug, Clone)]
pub struct Table {
    topology: Topology,
    settings: DinnerSettings,
}

impl Table {
    /// Validate the topology and set the table.
    ///
    /// # Returns
    ///
    /// * `Ok(Table)` - The seating plan is well formed
    /// * `Err(SymposiumError::InvalidTopology)` - Empty table, bad names or fork ids
    pub fn new(topology: Topology, settings: DinnerSettings) -> Result<Self> {
        topology.validate()?;
        Ok(Self { topology, settings })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Run one dinner and collect every philosopher's completion token.
    ///
    /// Blocks until every philosopher thread has been joined. If any
    /// philosopher fails or panics, the first failure is returned once all
    /// threads are done. A philosopher's own failure is preferred over the
    /// `BarrierAbandoned` it causes at the rest of the table.
    pub fn dine(&self, sink: &dyn EventSink) -> Result<DinnerReport> {
        let seats = self.topology.seats();
        let n = seats.len();
        let forks = ForkPool::new(self.topology.fork_count());
        let barrier = SeatingBarrier::new(n);
        let collector = CompletionCollector::with_capacity(n);

        info!(
            philosophers = n,
            forks = forks.size(),
            rounds = self.settings.rounds,
            "the table is set"
        );
        let started = Instant::now();

        let (spawn_error, outcomes) = thread::scope(|s| {
            let mut handles = Vec::with_capacity(n);
            let mut spawn_error = None;

            for seat in seats {
                let philosopher = Philosopher::new(
                    seat,
                    &self.settings,
                    &forks,
                    &barrier,
                    collector.sender(),
                    sink,
                );
                let spawned = thread::Builder::new()
                    .name(seat.name.clone())
                    .spawn_scoped(s, move || philosopher.dine());

                match spawned {
                    Ok(handle) => handles.push((seat.name.as_str(), handle)),
                    Err(e) => {
                        // Already seated philosophers would wait for this one forever.
                        barrier.abandon();
                        spawn_error =
                            Some(SymposiumError::SpawnFailed(seat.name.clone(), e.to_string()));
                        break;
                    }
                }
            }

            let outcomes: Vec<_> = handles
                .into_iter()
                .map(|(name, handle)| (name, handle.join()))
                .collect();
            (spawn_error, outcomes)
        });

        if let Some(err) = spawn_error {
            error!(error = %err, "dinner abandoned");
            return Err(err);
        }

        let mut meals = BTreeMap::new();
        let mut first_error = None;
        for (name, outcome) in outcomes {
            let failure = match outcome {
                Ok(Ok(eaten)) => {
                    meals.insert(name.to_string(), eaten);
                    continue;
                }
                Ok(Err(e)) => e,
                Err(_) => SymposiumError::AgentPanicked(name.to_string()),
            };
            error!(philosopher = name, error = %failure, "philosopher did not finish");
            let replace = match &first_error {
                None => true,
                Some(SymposiumError::BarrierAbandoned) => {
                    !matches!(failure, SymposiumError::BarrierAbandoned)
                }
                Some(_) => false,
            };
            if replace {
                first_error = Some(failure);
            }
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        let completed = collector.drain(n)?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            completed = completed.len(),
            elapsed_ms, "the table is empty"
        );

        Ok(DinnerReport {
            completed,
            rounds: self.settings.rounds,
            meals,
            fork_acquisitions: forks.acquisitions(),
            elapsed_ms,
        })
    }
}
