//! Single-factor market model regressions.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tercile_math::{ordinary_least_squares, sample_std};
use tercile_primitives::{
    BetaProfile, PortfolioLabel, RegressionResult, ReturnSeries, SampleWindow,
};

use crate::{ModelError, PortfolioSet};

/// Standard errors and deviations at or below this are treated as zero.
const TOLERANCE: f64 = 1e-12;

/// A regression that could not be estimated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionFailure {
    /// Portfolio regressed.
    pub label: PortfolioLabel,
    /// Window name.
    pub window: String,
    /// Why it failed.
    pub reason: String,
}

/// Regresses portfolio returns on the market: `y = alpha + beta * x + e`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketModelEngine;

impl MarketModelEngine {
    /// Create a new engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fit the market model for one series over one window.
    ///
    /// Only dates present in both `portfolio` and `market` inside `window` are used.
    /// The alpha t-statistic and information ratio are NaN when their denominators
    /// vanish, e.g. when the portfolio is the market itself.
    ///
    /// # Arguments
    /// * `portfolio` - Dependent series
    /// * `market` - Market series
    /// * `window` - Sample window
    ///
    /// # Errors
    /// Returns `ModelError::DegenerateRegression` with fewer than two aligned
    /// observations, no variance in the market returns, or a singular design.
    pub fn regress(
        &self,
        portfolio: &ReturnSeries,
        market: &ReturnSeries,
        window: &SampleWindow,
    ) -> Result<RegressionResult, ModelError> {
        let label = portfolio.label;
        let degenerate = |reason: String| ModelError::DegenerateRegression { label, reason };

        let (y, x) = portfolio.window(window).paired_with(&market.window(window));
        let n = y.len();
        if n < 2 {
            return Err(degenerate(format!("{n} aligned observations")));
        }
        if sample_std(&x).is_none_or(|s| s <= TOLERANCE) {
            return Err(degenerate("market returns have zero variance".to_string()));
        }

        let design = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { x[i] });
        let fit = ordinary_least_squares(&Array1::from(y), &design)
            .map_err(|e| degenerate(e.to_string()))?;

        let alpha = fit.coefficients[0];
        let beta = fit.coefficients[1];
        let residual_std = sample_std(&fit.residuals.to_vec()).unwrap_or(f64::NAN);
        let information_ratio = if residual_std.is_finite() && residual_std > TOLERANCE {
            alpha / residual_std
        } else {
            f64::NAN
        };

        Ok(RegressionResult {
            label,
            window: window.name.clone(),
            n_obs: n,
            beta,
            alpha,
            alpha_t_stat: fit.t_stat(0, TOLERANCE),
            information_ratio,
            r_squared: fit.r_squared,
            residual_std,
            profile: BetaProfile::classify(beta),
        })
    }

    /// Regress every non-market portfolio on the market for every window.
    ///
    /// A failed regression is recorded and the rest continue.
    ///
    /// # Returns
    /// Successful fits and failures, both ordered by window and then portfolio.
    #[must_use]
    pub fn regress_all(
        &self,
        portfolios: &PortfolioSet,
        windows: &[SampleWindow],
    ) -> (Vec<RegressionResult>, Vec<RegressionFailure>) {
        let mut results = Vec::new();
        let mut failures = Vec::new();
        let Some(market) = portfolios.market() else {
            tracing::warn!("no market series; skipping market model regressions");
            return (results, failures);
        };

        for window in windows {
            for series in portfolios.iter().filter(|s| s.label != PortfolioLabel::Market) {
                match self.regress(series, market, window) {
                    Ok(result) => {
                        tracing::debug!(
                            portfolio = %result.label,
                            window = %result.window,
                            beta = result.beta,
                            alpha = result.alpha,
                            "fitted market model"
                        );
                        results.push(result);
                    }
                    Err(e) => {
                        tracing::warn!(
                            portfolio = %series.label,
                            window = %window.name,
                            error = %e,
                            "market model regression failed"
                        );
                        failures.push(RegressionFailure {
                            label: series.label,
                            window: window.name.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        tracing::info!(
            fitted = results.len(),
            failed = failures.len(),
            "ran market model regressions"
        );
        (results, failures)
    }
}
