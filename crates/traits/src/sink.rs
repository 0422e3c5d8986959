//! Output collaborators.

use tercile_primitives::{PerformanceMetrics, RankedPanel, RegressionResult, ReturnSeries};

use crate::CollaboratorError;

/// Persists pipeline results.
pub trait Writer: Send + Sync {
    /// Where results are written (a directory, a stream).
    type Destination: ?Sized;

    /// Write the ranked panel with tercile membership.
    ///
    /// # Errors
    /// Returns `CollaboratorError` if the destination cannot be written.
    fn write_panel(
        &self,
        panel: &RankedPanel,
        destination: &Self::Destination,
    ) -> Result<(), CollaboratorError>;

    /// Write performance metrics.
    ///
    /// # Errors
    /// Returns `CollaboratorError` if the destination cannot be written.
    fn write_metrics(
        &self,
        metrics: &[PerformanceMetrics],
        destination: &Self::Destination,
    ) -> Result<(), CollaboratorError>;

    /// Write market-model regression results.
    ///
    /// # Errors
    /// Returns `CollaboratorError` if the destination cannot be written.
    fn write_regression(
        &self,
        results: &[RegressionResult],
        destination: &Self::Destination,
    ) -> Result<(), CollaboratorError>;

    /// Write date-indexed series under a name such as `returns` or `cumulative`.
    ///
    /// # Errors
    /// Returns `CollaboratorError` if the destination cannot be written.
    fn write_series(
        &self,
        name: &str,
        series: &[ReturnSeries],
        destination: &Self::Destination,
    ) -> Result<(), CollaboratorError>;
}

/// Renders cumulative-return and drawdown series.
///
/// The visualizer only reads the series; it never feeds anything back to the pipeline.
pub trait Visualizer {
    /// Rendering error.
    type Error: std::error::Error;

    /// Render one chart per input collection.
    ///
    /// # Errors
    /// Returns `Self::Error` if rendering fails.
    fn render(
        &self,
        cumulative: &[ReturnSeries],
        drawdowns: &[ReturnSeries],
    ) -> Result<(), Self::Error>;
}
