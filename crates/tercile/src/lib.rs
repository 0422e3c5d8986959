//! # tercile
//!
//! Liquidity and growth tercile portfolios from annual firm fundamentals.
//!
//! Each year, firms are ranked on their current ratio and on their winsorized sales
//! growth. The two ranks are averaged and the cross-section is cut into terciles.
//! Equal-weighted daily portfolios of the Top, Middle and Bottom terciles, the joined
//! Market and the Top minus Bottom Long-Short are then evaluated with annualized
//! statistics, drawdowns and a market-model regression per sample window.
//!
//! This crate re-exports the workspace crates. Individual components can be enabled via
//! feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Panel, rank, return and metric types
//! - `traits`: Loader, writer, period-mapping and signal abstractions
//! - `math`: Winsorization, ranking, quantile bins, OLS and return statistics
//! - `utils`: Date parsing and typed column extraction
//! - `panel`: Panel cleaning and signal construction
//! - `model`: Ranking, portfolios, performance, market model and the pipeline
//! - `io`: CSV loaders and file writers
//! - `cli`: The `report` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use tercile::model::{Pipeline, PipelineConfig};
//!
//! let report = Pipeline::new(PipelineConfig::default()).run(&raw, &universe, &returns)?;
//! for m in report.metrics_for("full") {
//!     println!("{}: sharpe {:.3}", m.label, m.sharpe_ratio);
//! }
//!
//! // Or with specific features only:
//! // [dependencies]
//! // tercile = { version = "0.1", default-features = false, features = ["model"] }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use tercile_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use tercile_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use tercile_math as math;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use tercile_utils as utils;
#[cfg(feature = "panel")]
#[doc(inline)]
pub use tercile_panel as panel;
#[cfg(feature = "model")]
#[doc(inline)]
pub use tercile_model as model;
#[cfg(feature = "io")]
#[doc(inline)]
pub use tercile_io as io;

// Used only by the report bin.
#[cfg(feature = "cli")]
use {clap as _, serde as _, toml as _, tracing as _, tracing_subscriber as _};
