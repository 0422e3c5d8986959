//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Invalid winsorization limit.
    #[error("invalid winsorization limit: {0} (must be in [0, 0.5))")]
    InvalidLimit(f64),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Bin count must be at least one.
    #[error("invalid bin count: {0}")]
    InvalidBinCount(usize),

    /// Too few distinct values to form the requested bins.
    #[error("{distinct} distinct values cannot fill {required} quantile bins")]
    InsufficientDistinct {
        /// Distinct values observed.
        distinct: usize,
        /// Bins requested.
        required: usize,
    },

    /// Interpolated quantile edges collapse onto each other.
    #[error("quantile edges are not strictly increasing")]
    NonIncreasingEdges,
}
