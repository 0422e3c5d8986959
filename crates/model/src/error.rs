//! Error types for ranking, portfolio construction and analytics.

use tercile_math::MathError;
use tercile_panel::PanelError;
use tercile_primitives::{Period, PortfolioLabel};

/// Errors that can occur in the analytical stages.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A period cannot be split into the requested number of groups.
    #[error(
        "period {period}: {distinct} distinct combined ranks cannot form {required} groups"
    )]
    InsufficientCrossSection {
        /// Period affected.
        period: Period,
        /// Distinct combined-rank values in the period.
        distinct: usize,
        /// Groups requested.
        required: usize,
    },

    /// A portfolio has no member on any date.
    #[error("portfolio {label} has no member returns")]
    EmptyPortfolio {
        /// Portfolio affected.
        label: PortfolioLabel,
    },

    /// A market-model regression cannot be estimated.
    #[error("degenerate regression for {label}: {reason}")]
    DegenerateRegression {
        /// Portfolio regressed.
        label: PortfolioLabel,
        /// Why the regression failed.
        reason: String,
    },

    /// Panel construction error.
    #[error("panel error: {0}")]
    Panel(#[from] PanelError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ModelError {
    /// Returns whether this error is recoverable.
    ///
    /// Recoverable errors affect a single period or portfolio; the pipeline records them
    /// and carries on with the rest.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientCrossSection { .. } | Self::DegenerateRegression { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::EmptyPortfolio { label: PortfolioLabel::LongShort };
        assert_eq!(err.to_string(), "portfolio Long-Short has no member returns");

        let err =
            ModelError::InsufficientCrossSection { period: Period(2004), distinct: 2, required: 3 };
        assert!(err.to_string().contains("2004"));
    }

    #[test]
    fn error_is_recoverable() {
        let err = ModelError::DegenerateRegression {
            label: PortfolioLabel::Top,
            reason: "zero variance".to_string(),
        };
        assert!(err.is_recoverable());

        let err = ModelError::Panel(PanelError::EmptySignalPanel);
        assert!(!err.is_recoverable());
    }
}
