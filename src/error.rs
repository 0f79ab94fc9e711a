//! Error types for the simulation kernel.

use thiserror::Error;

use crate::trial::Phase;

/// Process exit codes used by the `monty_hall` binary.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Usage error (invalid arguments)
    pub const USAGE_ERROR: i32 = 64;
}

/// Errors raised by trials, batches and door sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A trial step was called out of sequence.
    #[error("cannot {operation} a trial in the {phase} phase")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    /// A batch must contain at least one trial.
    #[error("batch size must be at least 1, got {0}")]
    InvalidBatchSize(u64),

    /// A parallel batch must be split into at least one chunk.
    #[error("parallel batch needs at least one chunk")]
    InvalidChunkCount,

    /// The door source could not produce another door.
    #[error("door source exhausted after {draws} draws")]
    SourceExhausted { draws: usize },
}

impl SimulationError {
    /// Exit code the binary reports for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidBatchSize(_) | Self::InvalidChunkCount => ExitCode::USAGE_ERROR,
            Self::InvalidState { .. } | Self::SourceExhausted { .. } => ExitCode::ERROR,
        }
    }
}
