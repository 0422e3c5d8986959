#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod winsorize;
pub use winsorize::{Winsorizer, winsorize};

mod rank;
pub use rank::{RankOrder, average_rank};

mod quantile;
pub use quantile::{distinct_count, quantile_bins, quantile_edges, quantile_linear};

mod linalg;
pub use linalg::{OlsResult, ordinary_least_squares};

mod stats;
pub use stats::{
    cumulative_returns, drawdowns, max_drawdown, mean, median, pearson_correlation, sample_std,
};

mod error;
pub use error::MathError;
