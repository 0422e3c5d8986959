#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod ranker;
pub use ranker::{
    CrossSectionalRanker, InsufficientPeriodPolicy, RankerConfig, RankingReport, SkippedPeriod,
};

mod portfolio;
pub use portfolio::{JoinReport, PortfolioBuilder, PortfolioSet};

mod performance;
pub use performance::{CorrelationMatrix, PerformanceAnalyzer, PerformanceConfig};

mod market_model;
pub use market_model::{MarketModelEngine, RegressionFailure};

mod pipeline;
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use tercile_traits::{CalendarYear, FiscalYear, PeriodMapping};

    pub use super::{
        CrossSectionalRanker, MarketModelEngine, ModelError, PerformanceAnalyzer, Pipeline,
        PipelineConfig, PortfolioBuilder,
    };
}
