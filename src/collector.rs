//! Completion collector.
//!
//! A bounded channel with one slot per philosopher. Each philosopher puts its
//! name in exactly once on leaving the table; the table drains all of them
//! after every thread has been joined. Neither side ever has to wait.

use crate::error::{Result, SymposiumError};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

#[derive(Debug)]
pub struct CompletionCollector {
    capacity: usize,
    tx: SyncSender<String>,
    rx: Receiver<String>,
}

impl CompletionCollector {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel(capacity);
        Self { capacity, tx, rx }
    }

    /// A cloneable handle philosophers use to report completion.
    pub fn sender(&self) -> CompletionSender {
        CompletionSender {
            capacity: self.capacity,
            tx: self.tx.clone(),
        }
    }

    /// Take exactly `expected` tokens in arrival order.
    ///
    /// Fails with `CollectorShort` if fewer tokens have been put.
    pub fn drain(&self, expected: usize) -> Result<Vec<String>> {
        let mut tokens = Vec::with_capacity(expected);
        while tokens.len() < expected {
            match self.rx.try_recv() {
                Ok(token) => tokens.push(token),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                    return Err(SymposiumError::CollectorShort {
                        expected,
                        available: tokens.len(),
                    });
                }
            }
        }
        Ok(tokens)
    }
}

/// Sending half of a [`CompletionCollector`].
#[derive(Debug, Clone)]
pub struct CompletionSender {
    capacity: usize,
    tx: SyncSender<String>,
}

impl CompletionSender {
    /// Put one completion token. Never blocks.
    ///
    /// A full buffer means more philosophers finished than the collector was
    /// sized for; that is reported as `CollectorFull`.
    pub fn put(&self, token: impl Into<String>) -> Result<()> {
        match self.tx.try_send(token.into()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(token)) | Err(TrySendError::Disconnected(token)) => {
                Err(SymposiumError::CollectorFull(self.capacity, token))
            }
        }
    }
}
