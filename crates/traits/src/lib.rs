#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod source;
pub use source::{Loader, UniverseProvider};

mod sink;
pub use sink::{Visualizer, Writer};

mod period;
pub use period::{CalendarYear, FiscalYear, PeriodMapping};

mod signal;
pub use signal::PanelSignal;

mod error;
pub use error::CollaboratorError;
