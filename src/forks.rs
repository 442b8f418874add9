//! Fork pool: one exclusive lock per fork id.
//!
//! Each fork records which thread is holding it. A philosopher blocks in
//! [`ForkPool::acquire`] until the fork is free, then receives a [`ForkGuard`].
//!
//! # RAII Guards
//!
//! Forks are put down when their guard is released or dropped, so a fork is
//! freed on every exit path, including early returns and unwinding. Guards
//! cannot be sent to another thread: only the thread that picked a fork up
//! may put it down.
//!
//! # Reentrancy
//!
//! Picking up a fork the calling thread already holds would block forever.
//! The pool detects it and fails with [`SymposiumError::ReentrantAcquire`].

use crate::error::{Result, SymposiumError};
use parking_lot::{Condvar, Mutex};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};
use tracing::trace;

#[derive(Debug, Default)]
struct ForkSlot {
    holder: Mutex<Option<ThreadId>>,
    freed: Condvar,
    acquisitions: AtomicU64,
}

/// Dense pool of forks indexed `0..size()`.
#[derive(Debug)]
pub struct ForkPool {
    slots: Vec<ForkSlot>,
}

impl ForkPool {
    /// Create a pool of `size` free forks.
    pub fn new(size: usize) -> Self {
        Self {
            slots: (0..size).map(|_| ForkSlot::default()).collect(),
        }
    }

    /// Number of forks on the table.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Pick up a fork, blocking until it is free.
    ///
    /// # Returns
    ///
    /// * `Ok(ForkGuard)` - The fork is held by the calling thread
    /// * `Err(SymposiumError::UnknownFork)` - `fork` is outside the pool
    /// * `Err(SymposiumError::ReentrantAcquire)` - The calling thread already holds `fork`
    pub fn acquire(&self, fork: usize) -> Result<ForkGuard<'_>> {
        let slot = self.slot(fork)?;
        let me = thread::current().id();

        let mut holder = slot.holder.lock();
        if *holder == Some(me) {
            return Err(SymposiumError::ReentrantAcquire(fork));
        }
        while holder.is_some() {
            slot.freed.wait(&mut holder);
        }
        *holder = Some(me);
        drop(holder);

        slot.acquisitions.fetch_add(1, Ordering::Relaxed);
        trace!(fork, "fork picked up");

        Ok(ForkGuard {
            pool: self,
            fork,
            released: false,
            _not_send: PhantomData,
        })
    }

    /// Whether a fork is currently held by anyone.
    pub fn is_held(&self, fork: usize) -> Result<bool> {
        Ok(self.slot(fork)?.holder.lock().is_some())
    }

    /// Successful acquisitions per fork, indexed by fork id.
    pub fn acquisitions(&self) -> Vec<u64> {
        self.slots
            .iter()
            .map(|s| s.acquisitions.load(Ordering::Relaxed))
            .collect()
    }

    fn slot(&self, fork: usize) -> Result<&ForkSlot> {
        self.slots.get(fork).ok_or(SymposiumError::UnknownFork {
            fork,
            size: self.slots.len(),
        })
    }

    fn put_down(&self, fork: usize) {
        // Guards only exist for forks inside the pool.
        let slot = &self.slots[fork];
        *slot.holder.lock() = None;
        slot.freed.notify_one();
        trace!(fork, "fork put down");
    }
}

/// RAII guard for a held fork.
///
/// When dropped, the fork is put down and one waiting philosopher is woken.
#[derive(Debug)]
pub struct ForkGuard<'a> {
    pool: &'a ForkPool,
    fork: usize,
    released: bool,
    _not_send: PhantomData<*const ()>,
}

impl ForkGuard<'_> {
    /// Id of the held fork.
    pub fn fork(&self) -> usize {
        self.fork
    }

    /// Put the fork down before the guard goes out of scope.
    pub fn release(mut self) {
        self.released = true;
        self.pool.put_down(self.fork);
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.pool.put_down(self.fork);
        }
    }
}
