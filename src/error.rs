//! Engine error type.

use thiserror::Error;

use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors reported by the engine and the session boundary.
///
/// Every error is scoped to the failing call: state is never mutated
/// before the error is detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid process descriptor: {message}")]
    Validation { message: String },

    #[error("Process {id} already exists. Use a different ID.")]
    DuplicateId { id: String },

    #[error("Unsupported algorithm: {name}. Available algorithms: FCFS, SJF, RR")]
    UnsupportedAlgorithm { name: String },

    #[error("Invalid quantum {quantum:?}: Round Robin requires a quantum in [{min}, {max}]")]
    InvalidQuantum {
        quantum: Option<i64>,
        min: u32,
        max: u32,
    },

    #[error("No processes to schedule. Add at least one process.")]
    EmptyProcessSet,

    #[error("{} invalid process descriptor(s)", .errors.len())]
    InvalidProcessSet { errors: Vec<ValidationError> },

    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        match err.kind {
            ValidationErrorKind::DuplicateId => Self::DuplicateId { id: err.process_id },
            _ => Self::Validation {
                message: err.message,
            },
        }
    }
}
