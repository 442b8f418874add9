//! The philosopher loop.
//!
//! `seated -> (acquiring -> eating -> thinking -> releasing) x rounds -> left_table`
//!
//! Forks are always picked up in ascending id order. Every philosopher that
//! shares a fork therefore agrees on which of its forks comes first, so no
//! cycle of philosophers can each hold one fork while waiting for the next.
//! A seat whose two sides name the same fork picks it up once per round.

use crate::barrier::SeatingBarrier;
use crate::collector::CompletionSender;
use crate::error::Result;
use crate::events::{DiningAction, DiningEvent, EventSink};
use crate::forks::{ForkGuard, ForkPool};
use crate::table::DinnerSettings;
use crate::topology::Seat;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// One philosopher, borrowing the shared table state for the length of a dinner.
pub struct Philosopher<'a> {
    seat: &'a Seat,
    settings: &'a DinnerSettings,
    forks: &'a ForkPool,
    barrier: &'a SeatingBarrier,
    done: CompletionSender,
    sink: &'a dyn EventSink,
}

impl<'a> Philosopher<'a> {
    pub fn new(
        seat: &'a Seat,
        settings: &'a DinnerSettings,
        forks: &'a ForkPool,
        barrier: &'a SeatingBarrier,
        done: CompletionSender,
        sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            seat,
            settings,
            forks,
            barrier,
            done,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.seat.name
    }

    /// Sit down, eat every round, then report completion.
    ///
    /// Returns the number of meals eaten.
    pub fn dine(self) -> Result<u32> {
        let mut seating = Seating {
            barrier: self.barrier,
            arrived: false,
        };
        info!(philosopher = %self.name(), "{} is seated at the table", self.name());
        self.emit(DiningEvent::new(self.name(), DiningAction::Seated));
        let arrival = self.barrier.arrive();
        seating.arrived = true;
        arrival?;

        let mut meals = 0;
        for round in 1..=self.settings.rounds {
            self.eat_once(round)?;
            meals += 1;
        }

        info!(philosopher = %self.name(), meals, "{} left the table", self.name());
        self.emit(DiningEvent::new(self.name(), DiningAction::LeftTable));
        self.done.put(self.name())?;
        Ok(meals)
    }

    fn eat_once(&self, round: u32) -> Result<()> {
        let (first, second) = self.seat.pickup_order();
        let first = self.pick_up(first, round)?;
        let second = second.map(|fork| self.pick_up(fork, round)).transpose()?;

        debug!(philosopher = %self.name(), round, "{} has both forks and is eating", self.name());
        self.emit(DiningEvent::new(self.name(), DiningAction::Eating).with_round(round));
        pause(self.settings.eat_time);

        debug!(philosopher = %self.name(), round, "{} is thinking", self.name());
        self.emit(DiningEvent::new(self.name(), DiningAction::Thinking).with_round(round));
        pause(self.settings.think_time);

        first.release();
        if let Some(second) = second {
            second.release();
        }

        debug!(philosopher = %self.name(), round, "{} put down the forks", self.name());
        self.emit(DiningEvent::new(self.name(), DiningAction::PutDownForks).with_round(round));
        Ok(())
    }

    fn pick_up(&self, fork: usize, round: u32) -> Result<ForkGuard<'a>> {
        let guard = self.forks.acquire(fork)?;
        let side = if fork == self.seat.left { "left" } else { "right" };
        debug!(philosopher = %self.name(), fork, round, "{} takes the {} fork", self.name(), side);
        self.emit(
            DiningEvent::new(self.name(), DiningAction::TookFork)
                .with_fork(fork)
                .with_round(round),
        );
        Ok(guard)
    }

    fn emit(&self, event: DiningEvent) {
        self.sink.record(&event);
    }
}

/// Abandons the seating barrier if its philosopher unwinds before arriving.
struct Seating<'a> {
    barrier: &'a SeatingBarrier,
    arrived: bool,
}

impl Drop for Seating<'_> {
    fn drop(&mut self) {
        if !self.arrived {
            self.barrier.abandon();
        }
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
