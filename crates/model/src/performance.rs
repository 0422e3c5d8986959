//! Risk and return analytics for portfolio series.

use serde::{Deserialize, Serialize};
use tercile_math::{max_drawdown, mean, pearson_correlation, sample_std};
use tercile_primitives::{PerformanceMetrics, PortfolioLabel, ReturnSeries, SampleWindow};

use crate::PortfolioSet;

/// Standard deviations at or below this are treated as zero.
const ZERO_VARIANCE: f64 = 1e-12;

/// Configuration for the performance analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Return observations per year used for annualization.
    pub periods_per_year: f64,
    /// Sample windows every metric is reported for.
    pub windows: Vec<SampleWindow>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252.0,
            windows: vec![
                SampleWindow::full(),
                SampleWindow::in_sample(),
                SampleWindow::out_of_sample(),
            ],
        }
    }
}

/// Pairwise Pearson correlations between portfolio series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Row and column labels.
    pub labels: Vec<PortfolioLabel>,
    /// Row-major correlations; NaN where undefined.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two labels, if both are present.
    #[must_use]
    pub fn get(&self, a: PortfolioLabel, b: PortfolioLabel) -> Option<f64> {
        let i = self.labels.iter().position(|&l| l == a)?;
        let j = self.labels.iter().position(|&l| l == b)?;
        Some(self.values[i][j])
    }
}

/// Computes annualized performance statistics for return series.
#[derive(Debug, Clone, Default)]
pub struct PerformanceAnalyzer {
    config: PerformanceConfig,
}

impl PerformanceAnalyzer {
    /// Create a new analyzer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PerformanceConfig::default())
    }

    /// Create an analyzer with the given configuration.
    #[must_use]
    pub const fn with_config(config: PerformanceConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    /// Metrics of one series over one window.
    ///
    /// The Sharpe ratio is the plain mean over standard deviation with no risk-free rate
    /// and no annualization. It is NaN for fewer than two observations or a flat series.
    ///
    /// # Returns
    /// `None` when the window contains none of the series' dates.
    #[must_use]
    pub fn metrics(
        &self,
        series: &ReturnSeries,
        window: &SampleWindow,
    ) -> Option<PerformanceMetrics> {
        let sub = series.window(window);
        let values = sub.values();
        let mean_return = mean(values)?;
        let std = sample_std(values).unwrap_or(f64::NAN);
        let ppy = self.config.periods_per_year;

        let sharpe_ratio = if std.is_finite() && std > ZERO_VARIANCE {
            mean_return / std
        } else {
            f64::NAN
        };
        let total_return = sub.cumulative().values().last().map_or(0.0, |c| c - 1.0);

        Some(PerformanceMetrics {
            label: series.label,
            window: window.name.clone(),
            n_obs: values.len(),
            mean_return,
            annualized_return: (1.0 + mean_return).powf(ppy) - 1.0,
            annualized_volatility: std * ppy.sqrt(),
            sharpe_ratio,
            max_drawdown: max_drawdown(values),
            total_return,
        })
    }

    /// Metrics of every series over every configured window.
    ///
    /// Windows with no observation for a series are left out.
    #[must_use]
    pub fn analyze(&self, portfolios: &PortfolioSet) -> Vec<PerformanceMetrics> {
        let results: Vec<PerformanceMetrics> = self
            .config
            .windows
            .iter()
            .flat_map(|w| portfolios.iter().filter_map(move |s| self.metrics(s, w)))
            .collect();

        tracing::info!(
            n_series = portfolios.len(),
            n_windows = self.config.windows.len(),
            n_metrics = results.len(),
            "computed performance metrics"
        );
        results
    }

    /// Pearson correlation of every pair of series.
    ///
    /// Series are first aligned; each pair is then correlated over the dates both have,
    /// which only differs from the aligned dates for Middle.
    #[must_use]
    pub fn correlation_matrix(&self, portfolios: &PortfolioSet) -> CorrelationMatrix {
        let aligned = portfolios.aligned();
        let series: Vec<&ReturnSeries> = aligned.iter().collect();
        let values = series
            .iter()
            .map(|a| {
                series
                    .iter()
                    .map(|b| {
                        let (x, y) = a.paired_with(b);
                        pearson_correlation(&x, &y).unwrap_or(f64::NAN)
                    })
                    .collect()
            })
            .collect();
        CorrelationMatrix { labels: aligned.labels().collect(), values }
    }

    /// Label with the highest finite Sharpe ratio among `metrics`.
    #[must_use]
    pub fn best_sharpe(metrics: &[PerformanceMetrics]) -> Option<PortfolioLabel> {
        metrics
            .iter()
            .filter(|m| m.sharpe_ratio.is_finite())
            .max_by(|a, b| a.sharpe_ratio.total_cmp(&b.sharpe_ratio))
            .map(|m| m.label)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;
    use tercile_primitives::Date;

    use super::*;

    fn series(label: PortfolioLabel, start_year: i32, values: &[f64]) -> ReturnSeries {
        let start = Date::from_ymd_opt(start_year, 1, 1).unwrap();
        ReturnSeries::from_points(
            label,
            values.iter().enumerate().map(|(i, &v)| (start + chrono::Days::new(i as u64), v)),
        )
    }

    #[test]
    fn performance_config_defaults() {
        let config = PerformanceConfig::default();
        assert_relative_eq!(config.periods_per_year, 252.0);
        let names: Vec<&str> = config.windows.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["full", "in_sample", "out_of_sample"]);
    }

    #[test]
    fn metrics_match_closed_form() {
        let s = series(PortfolioLabel::Top, 2010, &[0.01, -0.02, 0.03, 0.00]);
        let m = PerformanceAnalyzer::new().metrics(&s, &SampleWindow::full()).unwrap();

        let mean_r = 0.005;
        let var = (0.005_f64.powi(2) + 0.025_f64.powi(2) + 0.025_f64.powi(2) + 0.005_f64.powi(2))
            / 3.0;
        assert_eq!(m.n_obs, 4);
        assert_relative_eq!(m.mean_return, mean_r, epsilon = 1e-12);
        assert_relative_eq!(m.annualized_return, 1.005_f64.powf(252.0) - 1.0, epsilon = 1e-9);
        let volatility = var.sqrt() * 252.0_f64.sqrt();
        assert_relative_eq!(m.annualized_volatility, volatility, epsilon = 1e-12);
        assert_relative_eq!(m.sharpe_ratio, mean_r / var.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.max_drawdown, -0.02, epsilon = 1e-12);
        assert_relative_eq!(m.total_return, 1.01 * 0.98 * 1.03 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn compounding_identity() {
        let s = series(PortfolioLabel::Market, 2010, &[0.1, -0.05, 0.02]);
        let m = PerformanceAnalyzer::new().metrics(&s, &SampleWindow::full()).unwrap();
        let product: f64 = s.values().iter().map(|r| 1.0 + r).product();
        assert_relative_eq!(m.total_return + 1.0, product, epsilon = 1e-12);
    }

    #[rstest]
    #[case(&[0.01, 0.01, 0.01])]
    #[case(&[0.02])]
    fn undefined_sharpe_is_nan(#[case] values: &[f64]) {
        let s = series(PortfolioLabel::Top, 2010, values);
        let m = PerformanceAnalyzer::new().metrics(&s, &SampleWindow::full()).unwrap();
        assert!(m.sharpe_ratio.is_nan());
        assert_relative_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn empty_window_has_no_metrics() {
        let s = series(PortfolioLabel::Top, 2010, &[0.01, 0.02]);
        assert!(PerformanceAnalyzer::new().metrics(&s, &SampleWindow::out_of_sample()).is_none());
    }

    #[test]
    fn analyze_covers_windows_with_data() {
        let set = PortfolioSet::new(vec![
            series(PortfolioLabel::Top, 2015, &[0.01; 400]),
            series(PortfolioLabel::Market, 2015, &[0.02; 400]),
        ]);
        let metrics = PerformanceAnalyzer::new().analyze(&set);

        // 2015 dates fall in sample and the 2016 tail out of sample.
        assert_eq!(metrics.len(), 6);
        let in_sample = metrics
            .iter()
            .find(|m| m.label == PortfolioLabel::Top && m.window == "in_sample")
            .unwrap();
        assert_eq!(in_sample.n_obs, 365);
    }

    #[test]
    fn correlation_of_series() {
        let set = PortfolioSet::new(vec![
            series(PortfolioLabel::Top, 2010, &[0.01, 0.02, 0.03, 0.05]),
            series(PortfolioLabel::Bottom, 2010, &[-0.01, -0.02, -0.03, -0.05]),
            series(PortfolioLabel::Market, 2010, &[0.02, 0.04, 0.06, 0.10]),
        ]);
        let corr = PerformanceAnalyzer::new().correlation_matrix(&set);

        assert_eq!(corr.labels.len(), 3);
        assert_relative_eq!(
            corr.get(PortfolioLabel::Top, PortfolioLabel::Market).unwrap(),
            1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            corr.get(PortfolioLabel::Top, PortfolioLabel::Bottom).unwrap(),
            -1.0,
            epsilon = 1e-12
        );
        assert!(corr.get(PortfolioLabel::Middle, PortfolioLabel::Top).is_none());
    }

    #[test]
    fn middle_correlates_on_its_own_dates() {
        let set = PortfolioSet::new(vec![
            series(PortfolioLabel::Top, 2010, &[0.01, 0.02, 0.03, 0.05]),
            series(PortfolioLabel::Middle, 2010, &[0.03, 0.01]),
            series(PortfolioLabel::Market, 2010, &[0.02, 0.04, 0.06, 0.09]),
        ]);
        let corr = PerformanceAnalyzer::new().correlation_matrix(&set);

        assert_relative_eq!(
            corr.get(PortfolioLabel::Middle, PortfolioLabel::Top).unwrap(),
            -1.0,
            epsilon = 1e-12
        );
        assert!(corr.get(PortfolioLabel::Top, PortfolioLabel::Market).unwrap() > 0.99);
    }

    #[test]
    fn best_sharpe_skips_nan() {
        let analyzer = PerformanceAnalyzer::new();
        let full = SampleWindow::full();
        let metrics: Vec<PerformanceMetrics> = [
            (PortfolioLabel::Top, [0.01, 0.03]),
            (PortfolioLabel::Bottom, [0.05, 0.05]),
            (PortfolioLabel::Market, [0.0, 0.01]),
        ]
        .iter()
        .map(|(label, values)| analyzer.metrics(&series(*label, 2010, values), &full).unwrap())
        .collect();
        assert_eq!(PerformanceAnalyzer::best_sharpe(&metrics), Some(PortfolioLabel::Top));
        assert_eq!(PerformanceAnalyzer::best_sharpe(&[]), None);
    }
}
