//! Error types for symposium.
//!
//! Uses thiserror for derive macros. Every failure during a run is fatal:
//! nothing here is retried or compensated for.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for symposium operations.
#[derive(Error, Debug)]
pub enum SymposiumError {
    /// User provided invalid arguments, or config/event files could not be used.
    #[error("{0}")]
    UserError(String),

    /// The seating plan was rejected at construction time.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// A fork id outside the pool was requested.
    #[error("fork {fork} does not exist (pool has {size} forks)")]
    UnknownFork { fork: usize, size: usize },

    /// A thread tried to pick up a fork it is already holding.
    #[error("fork {0} is already held by the calling philosopher")]
    ReentrantAcquire(usize),

    /// More philosophers arrived at the seating barrier than it was sized for.
    #[error("seating barrier is full ({0} seats)")]
    BarrierOverfull(usize),

    /// The table gave up seating before every philosopher arrived.
    #[error("seating was abandoned before every philosopher arrived")]
    BarrierAbandoned,

    /// A philosopher thread could not be started.
    #[error("failed to seat philosopher '{0}': {1}")]
    SpawnFailed(String, String),

    /// The completion collector received more tokens than its capacity.
    #[error("completion collector is full ({0} slots); rejected token '{1}'")]
    CollectorFull(usize, String),

    /// Fewer completion tokens were available than the table expected.
    #[error("completion collector holds {available} tokens, expected {expected}")]
    CollectorShort { expected: usize, available: usize },

    /// A philosopher thread panicked instead of leaving the table.
    #[error("philosopher '{0}' panicked")]
    AgentPanicked(String),
}

impl SymposiumError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SymposiumError::UserError(_) => exit_codes::USER_ERROR,
            SymposiumError::InvalidTopology(_) => exit_codes::INVALID_TOPOLOGY,
            SymposiumError::UnknownFork { .. }
            | SymposiumError::ReentrantAcquire(_)
            | SymposiumError::BarrierOverfull(_)
            | SymposiumError::BarrierAbandoned
            | SymposiumError::SpawnFailed(..)
            | SymposiumError::CollectorFull(..)
            | SymposiumError::CollectorShort { .. }
            | SymposiumError::AgentPanicked(_) => exit_codes::PROTOCOL_FAILURE,
        }
    }
}

/// Result type alias for symposium operations.
pub type Result<T> = std::result::Result<T, SymposiumError>;
