//! End-to-end run from raw fundamentals to portfolio analytics.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tercile_panel::{
    CleanerConfig, CleaningReport, PanelCleaner, SignalConfig, SignalEngine, SignalReport,
};
use tercile_primitives::{
    Period, PerformanceMetrics, PortfolioLabel, RankedPanel, RegressionResult,
    ReturnObservation, ReturnSeries, SignalPanel, Tercile, Universe,
};
use tercile_traits::{CalendarYear, PeriodMapping};

use crate::{
    CorrelationMatrix, CrossSectionalRanker, JoinReport, MarketModelEngine, ModelError,
    PerformanceAnalyzer, PerformanceConfig, PortfolioBuilder, PortfolioSet, RankerConfig,
    RankingReport, RegressionFailure,
};

/// Configuration of every pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Panel cleaning.
    pub cleaner: CleanerConfig,
    /// Signal construction.
    pub signals: SignalConfig,
    /// Cross-sectional ranking.
    pub ranker: RankerConfig,
    /// Performance analytics and sample windows.
    pub performance: PerformanceConfig,
}

/// Everything a pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Rows removed while cleaning.
    pub cleaning: CleaningReport,
    /// Signal construction counts.
    pub signal_report: SignalReport,
    /// Winsorized signals.
    pub signals: SignalPanel,
    /// Ranking outcome.
    pub ranking: RankingReport,
    /// Ranks and group membership.
    pub ranked: RankedPanel,
    /// Share of ranked firm-years in each group.
    pub tercile_distribution: Vec<(Tercile, f64)>,
    /// Periods of the configured range without any ranked firm.
    pub missing_periods: Vec<Period>,
    /// Return join counts.
    pub join: JoinReport,
    /// Portfolio series, each on its own dates.
    pub portfolios: PortfolioSet,
    /// Portfolio series restricted to their common dates; Middle keeps its own.
    pub aligned: PortfolioSet,
    /// Metrics of the aligned series for every window.
    pub metrics: Vec<PerformanceMetrics>,
    /// Market-model fits for every window.
    pub regressions: Vec<RegressionResult>,
    /// Market-model fits that could not be estimated.
    pub regression_failures: Vec<RegressionFailure>,
    /// Correlations of the aligned series.
    pub correlations: CorrelationMatrix,
}

impl PipelineReport {
    /// Metrics reported for `window`.
    pub fn metrics_for<'a>(
        &'a self,
        window: &'a str,
    ) -> impl Iterator<Item = &'a PerformanceMetrics> + 'a {
        self.metrics.iter().filter(move |m| m.window == window)
    }

    /// Regression results reported for `window`.
    pub fn regressions_for<'a>(
        &'a self,
        window: &'a str,
    ) -> impl Iterator<Item = &'a RegressionResult> + 'a {
        self.regressions.iter().filter(move |r| r.window == window)
    }

    /// Portfolio with the highest Sharpe ratio in `window`.
    #[must_use]
    pub fn best_sharpe(&self, window: &str) -> Option<PortfolioLabel> {
        let metrics: Vec<PerformanceMetrics> = self.metrics_for(window).cloned().collect();
        PerformanceAnalyzer::best_sharpe(&metrics)
    }

    /// Cumulative growth of every aligned series.
    #[must_use]
    pub fn cumulative(&self) -> Vec<ReturnSeries> {
        self.aligned.iter().map(ReturnSeries::cumulative).collect()
    }

    /// Drawdown of every aligned series.
    #[must_use]
    pub fn drawdowns(&self) -> Vec<ReturnSeries> {
        self.aligned.iter().map(ReturnSeries::drawdown).collect()
    }
}

/// Runs cleaning, signals, ranking, portfolio construction and analytics in sequence.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<M: PeriodMapping = CalendarYear> {
    config: PipelineConfig,
    builder: PortfolioBuilder<M>,
}

impl Pipeline {
    /// Create a pipeline using calendar-year membership.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config, builder: PortfolioBuilder::new() }
    }
}

impl<M: PeriodMapping> Pipeline<M> {
    /// Create a pipeline with a custom return-date to period mapping.
    #[must_use]
    pub const fn with_mapping(config: PipelineConfig, mapping: M) -> Self {
        Self { config, builder: PortfolioBuilder::with_mapping(mapping) }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage.
    ///
    /// Analytics run on the aligned portfolio set so that Top, Bottom, Long-Short and
    /// Market cover the same dates.
    ///
    /// # Arguments
    /// * `raw` - Raw fundamentals table
    /// * `universe` - Admissible entities
    /// * `returns` - Security returns
    ///
    /// # Errors
    /// Propagates structural errors from each stage: schema problems, an empty signal
    /// panel, an aborted ranking or an empty portfolio. Failed regressions are reported
    /// in [`PipelineReport::regression_failures`] instead.
    pub fn run(
        &self,
        raw: &DataFrame,
        universe: &Universe,
        returns: &[ReturnObservation],
    ) -> Result<PipelineReport, ModelError> {
        let (panel, cleaning) = PanelCleaner::with_config(self.config.cleaner.clone())
            .clean(raw, universe)?;
        let (signals, signal_report) =
            SignalEngine::with_config(self.config.signals.clone()).compute(&panel)?;
        let (ranked, ranking) =
            CrossSectionalRanker::with_config(self.config.ranker.clone()).rank(&signals)?;

        let tercile_distribution = ranked.tercile_distribution();
        let missing_periods = ranked.missing_periods(self.config.cleaner.period_range);
        if !missing_periods.is_empty() {
            tracing::debug!(n_missing = missing_periods.len(), "periods without ranked firms");
        }

        let (portfolios, join) = self.builder.build(&ranked, returns)?;
        let aligned = portfolios.aligned();
        tracing::info!(n_dates = aligned.common_dates().len(), "aligned portfolio series");

        let analyzer = PerformanceAnalyzer::with_config(self.config.performance.clone());
        let metrics = analyzer.analyze(&aligned);
        let correlations = analyzer.correlation_matrix(&aligned);
        let (regressions, regression_failures) =
            MarketModelEngine::new().regress_all(&aligned, &self.config.performance.windows);

        Ok(PipelineReport {
            cleaning,
            signal_report,
            signals,
            ranking,
            ranked,
            tercile_distribution,
            missing_periods,
            join,
            portfolios,
            aligned,
            metrics,
            regressions,
            regression_failures,
            correlations,
        })
    }
}
