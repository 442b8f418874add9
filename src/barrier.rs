//! One-shot seating barrier.
//!
//! Every philosopher arrives exactly once. Nobody leaves [`SeatingBarrier::arrive`]
//! until the whole table is seated; the last arrival wakes everyone together.
//! The barrier is never reset.
//!
//! If the table cannot seat everyone (a philosopher thread failed to start),
//! [`SeatingBarrier::abandon`] wakes the waiters with an error instead.

use crate::error::{Result, SymposiumError};
use parking_lot::{Condvar, Mutex};
use tracing::debug;

#[derive(Debug)]
pub struct SeatingBarrier {
    total: usize,
    state: Mutex<Seating>,
    all_seated: Condvar,
}

#[derive(Debug, Default)]
struct Seating {
    arrived: usize,
    abandoned: bool,
}

impl SeatingBarrier {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            state: Mutex::new(Seating::default()),
            all_seated: Condvar::new(),
        }
    }

    /// Arrivals so far.
    pub fn arrived(&self) -> usize {
        self.state.lock().arrived
    }

    /// Register one arrival and block until all `total` participants have arrived.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Everyone is seated
    /// * `Err(SymposiumError::BarrierOverfull)` - Every seat was already taken
    /// * `Err(SymposiumError::BarrierAbandoned)` - The table gave up before everyone arrived
    pub fn arrive(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.abandoned {
            return Err(SymposiumError::BarrierAbandoned);
        }
        if state.arrived >= self.total {
            return Err(SymposiumError::BarrierOverfull(self.total));
        }
        state.arrived += 1;

        if state.arrived == self.total {
            debug!(seated = self.total, "everyone is seated");
            self.all_seated.notify_all();
            return Ok(());
        }

        while state.arrived < self.total && !state.abandoned {
            self.all_seated.wait(&mut state);
        }
        if state.arrived < self.total {
            return Err(SymposiumError::BarrierAbandoned);
        }
        Ok(())
    }

    /// Release every waiter with `BarrierAbandoned`.
    ///
    /// Has no effect once everyone is seated.
    pub fn abandon(&self) {
        let mut state = self.state.lock();
        if state.arrived < self.total {
            state.abandoned = true;
            self.all_seated.notify_all();
        }
    }
}
