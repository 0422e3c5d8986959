//! Error types for panel cleaning and signal construction.

/// Errors that can occur while building the signal panel.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// A required column is absent from the raw table.
    #[error("schema error: missing column {0:?}")]
    Schema(String),

    /// No observation has both signals defined.
    #[error("no observation has both signals defined")]
    EmptySignalPanel,

    /// Math operation error.
    #[error("math error: {0}")]
    Math(#[from] tercile_math::MathError),

    /// Column extraction error.
    #[error("column error: {0}")]
    Utils(#[from] tercile_utils::UtilsError),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
