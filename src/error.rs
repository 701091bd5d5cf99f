//! Error types for the knapsack front solvers.
//!
//! Invalid input is rejected before any DP table is allocated. Resource
//! failures (objective overflow, a table too large to allocate) surface
//! as errors instead of aborting the process.

use thiserror::Error;

/// Top-level error type for `u-mokp`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MokpError {
    // ---- Invalid arguments ----
    #[error("number of objectives must be at least 1")]
    NoObjectives,

    #[error("capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),

    #[error("item {item}: weight must be at least 1, got {weight}")]
    InvalidWeight { item: usize, weight: i64 },

    #[error("item {item}: expected {expected} objective values, got {found}")]
    DimensionMismatch {
        item: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    // ---- Resource failures ----
    #[error("objective value overflow while adding item {item}")]
    ValueOverflow { item: usize },

    #[error("capacity {capacity} is too large to allocate a DP table")]
    ResourceExhausted { capacity: i64 },

    #[error("too many items for exhaustive enumeration: {items} > {limit}")]
    TooManyItems { items: usize, limit: usize },
}

impl MokpError {
    /// Whether the error describes bad input rather than exhausted resources.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NoObjectives
                | Self::NegativeCapacity(_)
                | Self::InvalidWeight { .. }
                | Self::DimensionMismatch { .. }
                | Self::InvalidArgument(_)
                | Self::Config(_)
        )
    }
}

/// Result type alias for `u-mokp`.
pub type Result<T> = std::result::Result<T, MokpError>;
