//! Error types for insulation-evo
//!
//! Configuration problems are reported before a run starts. Numeric trouble
//! inside an objective never surfaces here; it is folded into the fitness value.

use thiserror::Error;

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Selection operation failed
    #[error("Selection failed: {0}")]
    SelectionFailed(String),

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Top-level error type for evolution runs
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A bound pair is inverted or not finite
    #[error("Invalid bounds for gene {index}: [{min}, {max}]")]
    InvalidBounds { index: usize, min: f64, max: f64 },

    /// Dimension mismatch between two gene-indexed inputs
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// Config or report (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
