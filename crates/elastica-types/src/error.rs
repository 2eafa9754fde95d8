//! Error types for the elastica engine.
//!
//! All crates return `ElasticaResult<T>` from fallible operations.
//! Per-constraint anomalies inside the solve loop (degenerate gradients,
//! non-finite stresses) are *not* errors — they are handled by local
//! skip policies so one malformed constraint cannot abort a step.

use thiserror::Error;

/// Unified error type for the elastica engine.
#[derive(Debug, Error)]
pub enum ElasticaError {
    /// Material parameter is out of valid range (e.g. Poisson ratio 0.5).
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Body topology or geometry is malformed or inconsistent.
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// `step()` was called before `setup()` — a programming-contract
    /// violation that must fail fast rather than run with empty state.
    #[error("Solver not set up: call setup() before step()")]
    SolverNotSetUp,

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, ElasticaError>`.
pub type ElasticaResult<T> = Result<T, ElasticaError>;
