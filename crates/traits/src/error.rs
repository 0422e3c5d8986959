//! Errors raised by loaders and writers.

use polars::prelude::PolarsError;

/// Errors that can occur while reading from or writing to an external collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] PolarsError),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A value could not be interpreted.
    #[error("cannot parse {what} from {value:?}")]
    Parse {
        /// Kind of value expected.
        what: &'static str,
        /// Offending input.
        value: String,
    },
}
