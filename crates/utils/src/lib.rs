#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod columns;
pub use columns::{date_column, float_column, has_column, string_column};

mod dates;
pub use dates::{date_from_epoch_days, date_from_yyyymmdd, parse_date};

mod error;
pub use error::UtilsError;
