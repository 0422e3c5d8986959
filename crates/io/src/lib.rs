#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod loader;
pub use loader::{CsvLoader, ReturnColumns};

mod universe;
pub use universe::CsvUniverseProvider;

mod writer;
pub use writer::{ExportFormat, FileWriter};
