//! Error types for utility functions.

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Column type cannot be interpreted as requested.
    #[error("column {column} has unsupported type {dtype}")]
    UnsupportedType {
        /// Column name.
        column: String,
        /// Polars dtype as text.
        dtype: String,
    },
}
