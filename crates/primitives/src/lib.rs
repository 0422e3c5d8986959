#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod entity;
pub use entity::{EntityId, Period, PeriodRange, Universe};

mod observation;
pub use observation::{Observation, Panel};

mod signal;
pub use signal::{SignalPanel, SignalRecord};

mod rank;
pub use rank::{CrossSectionalRank, RankedPanel, SignalSummary, Tercile, TercileSummary};

mod returns;
pub use returns::{LoadedReturns, ReturnObservation, ReturnSeries};

mod portfolio;
pub use portfolio::PortfolioLabel;

mod window;
pub use window::SampleWindow;

mod metrics;
pub use metrics::{BetaProfile, PerformanceMetrics, RegressionResult};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
