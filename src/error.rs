//! Error handling module
//!
//! Provides unified error types and handling for the entire engine.

use thiserror::Error;

/// Engine-wide error type
#[derive(Error, Debug)]
pub enum DriftError {
    #[error("Insufficient snapshots: at least two are required to detect drift")]
    InsufficientSnapshots,

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for engine operations
pub type DriftResult<T> = Result<T, DriftError>;

/// Helper function to create a computation error
pub fn computation_error(msg: impl Into<String>) -> DriftError {
    DriftError::Computation(msg.into())
}

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> DriftError {
    DriftError::Validation(msg.into())
}
