//! Error types for KTSP

use thiserror::Error;

use crate::edge::Edge;

/// Main error type for KTSP operations
#[derive(Debug, Error)]
pub enum KtspError {
    /// A requested edge has no cost in the instance
    #[error("Lookup error: no cost recorded for edge {edge}")]
    Lookup { edge: Edge },

    /// A structural invariant of the repair data structures was broken
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A repaired tour failed verification
    #[error("Repair invariant violated for tour {tour}: {detail}")]
    RepairInvariant { tour: usize, detail: String },

    /// The repair could not remove every shared edge
    #[error("Cannot form K disjoint cycles: tour {tour} keeps {unresolved} fixed edge(s)")]
    InfeasibleRepair { tour: usize, unresolved: usize },

    /// Malformed costs or tours
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected when applied
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure reported by a relaxation solver
    #[error("Relaxation error: {0}")]
    Relaxation(String),
}

impl KtspError {
    /// Returns true for the expected failure mode of the heuristic.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, KtspError::InfeasibleRepair { .. })
    }
}

/// Result type alias for KTSP operations
pub type Result<T> = std::result::Result<T, KtspError>;
