#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod schema;
pub use schema::PanelSchema;

mod clean;
pub use clean::{CleanerConfig, CleaningReport, PanelCleaner};

mod liquidity;
pub use liquidity::CurrentRatio;

mod growth;
pub use growth::{GrowthAdjacency, SalesGrowth};

mod engine;
pub use engine::{SignalConfig, SignalEngine, SignalReport};

mod error;
pub use error::PanelError;
