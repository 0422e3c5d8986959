//! Signal panel construction.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tercile_math::Winsorizer;
use tercile_primitives::{Panel, SignalPanel, SignalRecord};
use tercile_traits::PanelSignal;

use crate::{CurrentRatio, GrowthAdjacency, PanelError, SalesGrowth};

/// Configuration for the signal engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Fraction of sales growth values clipped from the bottom, in [0, 0.5).
    pub winsor_lower: f64,
    /// Fraction of sales growth values clipped from the top, in [0, 0.5).
    pub winsor_upper: f64,
    /// Which earlier observation growth is measured against.
    pub growth_adjacency: GrowthAdjacency,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            winsor_lower: 0.01,
            winsor_upper: 0.01,
            growth_adjacency: GrowthAdjacency::Sequence,
        }
    }
}

/// Row counts and bounds from one signal construction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    /// Observations in the cleaned panel.
    pub rows_in: usize,
    /// Observations whose current ratio is undefined.
    pub undefined_current_ratio: usize,
    /// Observations whose sales growth is undefined.
    pub undefined_sales_growth: usize,
    /// Observations dropped for missing either signal.
    pub rows_dropped: usize,
    /// Sales growth values moved by winsorization.
    pub winsorized: usize,
    /// Winsorization bounds applied to sales growth.
    pub growth_bounds: Option<(f64, f64)>,
    /// Records in the signal panel.
    pub rows_out: usize,
}

/// Computes current ratio and winsorized sales growth for a cleaned panel.
#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    config: SignalConfig,
}

impl SignalEngine {
    /// Create a new engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SignalConfig::default())
    }

    /// Create an engine with the given configuration.
    #[must_use]
    pub const fn with_config(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Build the signal panel.
    ///
    /// Sales growth is computed on the full cleaned panel, so a row whose current ratio
    /// is undefined still serves as the base for its successor. Rows missing either
    /// signal are then dropped and sales growth is winsorized across all remaining rows
    /// at once.
    ///
    /// # Arguments
    /// * `panel` - Cleaned panel sorted by (entity, period)
    ///
    /// # Returns
    /// The signal panel and a report of dropped and clipped values.
    ///
    /// # Errors
    /// * `PanelError::Math` if the winsorization limits are invalid
    /// * `PanelError::EmptySignalPanel` if no row has both signals
    pub fn compute(&self, panel: &Panel) -> Result<(SignalPanel, SignalReport), PanelError> {
        let winsorizer = Winsorizer::new(self.config.winsor_lower, self.config.winsor_upper)?;
        let growth_signal = SalesGrowth::new(self.config.growth_adjacency);
        let signals: [&dyn PanelSignal; 2] = [&CurrentRatio, &growth_signal];

        let [ratios, growth] = signals.map(|s| {
            let values = s.compute(panel);
            tracing::debug!(
                signal = s.name(),
                undefined = values.iter().filter(|v| v.is_none()).count(),
                "computed signal"
            );
            values
        });

        let mut report = SignalReport {
            rows_in: panel.len(),
            undefined_current_ratio: ratios.iter().filter(|v| v.is_none()).count(),
            undefined_sales_growth: growth.iter().filter(|v| v.is_none()).count(),
            ..Default::default()
        };

        let kept: Vec<(usize, f64, f64)> = ratios
            .iter()
            .zip(&growth)
            .enumerate()
            .filter_map(|(i, (cr, sg))| Some((i, (*cr)?, (*sg)?)))
            .collect();
        report.rows_dropped = panel.len() - kept.len();

        if kept.is_empty() {
            tracing::warn!(rows_in = panel.len(), "no observation has both signals defined");
            return Err(PanelError::EmptySignalPanel);
        }

        let raw_growth: Array1<f64> = kept.iter().map(|&(_, _, sg)| sg).collect();
        let clipped = winsorizer.apply(&raw_growth);
        report.growth_bounds = winsorizer.bounds(&raw_growth);
        report.winsorized = raw_growth.iter().zip(&clipped).filter(|(a, b)| a != b).count();

        let observations = panel.observations();
        let records: Vec<SignalRecord> = kept
            .iter()
            .zip(&clipped)
            .map(|(&(i, current_ratio, _), &sales_growth)| {
                let o = &observations[i];
                SignalRecord {
                    entity: o.entity.clone(),
                    period: o.period,
                    as_of: o.as_of,
                    current_ratio,
                    sales_growth,
                }
            })
            .collect();
        report.rows_out = records.len();

        tracing::info!(
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            undefined_current_ratio = report.undefined_current_ratio,
            undefined_sales_growth = report.undefined_sales_growth,
            winsorized = report.winsorized,
            "built signal panel"
        );

        Ok((SignalPanel::new(records), report))
    }
}
