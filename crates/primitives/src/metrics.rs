//! Performance and regression result records.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::PortfolioLabel;

/// Risk and return statistics of one portfolio over one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Portfolio described.
    pub label: PortfolioLabel,
    /// Window name.
    pub window: String,
    /// Number of return observations.
    pub n_obs: usize,
    /// Mean per-period return.
    pub mean_return: f64,
    /// `(1 + mean)^ppy - 1`.
    pub annualized_return: f64,
    /// Sample standard deviation scaled by `sqrt(ppy)`.
    pub annualized_volatility: f64,
    /// Mean over standard deviation, not annualized. NaN when undefined.
    pub sharpe_ratio: f64,
    /// Most negative drawdown, zero if the series never falls below a peak.
    pub max_drawdown: f64,
    /// Final cumulative value minus one.
    pub total_return: f64,
}

/// How a portfolio's market beta compares to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum BetaProfile {
    /// Beta within 0.1 of one.
    #[display("in line with market")]
    InLine,
    /// Beta below one.
    #[display("defensive")]
    Defensive,
    /// Beta above one.
    #[display("aggressive")]
    Aggressive,
}

impl BetaProfile {
    /// Classify a beta estimate.
    #[must_use]
    pub fn classify(beta: f64) -> Self {
        if (beta - 1.0).abs() < 0.1 {
            Self::InLine
        } else if beta < 1.0 {
            Self::Defensive
        } else {
            Self::Aggressive
        }
    }
}

/// Single-factor market-model fit of one portfolio over one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Portfolio regressed.
    pub label: PortfolioLabel,
    /// Window name.
    pub window: String,
    /// Number of aligned observations.
    pub n_obs: usize,
    /// Slope on the market return.
    pub beta: f64,
    /// Intercept.
    pub alpha: f64,
    /// Intercept over its standard error; NaN when undefined.
    pub alpha_t_stat: f64,
    /// Intercept over the sample standard deviation of residuals; NaN when undefined.
    pub information_ratio: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Sample standard deviation of residuals.
    pub residual_std: f64,
    /// Beta classification.
    pub profile: BetaProfile,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1.0, BetaProfile::InLine)]
    #[case(0.95, BetaProfile::InLine)]
    #[case(0.7, BetaProfile::Defensive)]
    #[case(-0.2, BetaProfile::Defensive)]
    #[case(1.3, BetaProfile::Aggressive)]
    fn classify_beta(#[case] beta: f64, #[case] expected: BetaProfile) {
        assert_eq!(BetaProfile::classify(beta), expected);
    }
}
