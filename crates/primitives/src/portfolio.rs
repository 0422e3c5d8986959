//! Portfolio labels.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Name of a portfolio series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum PortfolioLabel {
    /// Best tercile.
    Top,
    /// Middle tercile.
    Middle,
    /// Worst tercile.
    Bottom,
    /// Top minus Bottom.
    #[display("Long-Short")]
    #[serde(rename = "Long-Short")]
    LongShort,
    /// Every joined entity.
    Market,
}

impl PortfolioLabel {
    /// Every label in reporting order.
    pub const ALL: [Self; 5] =
        [Self::Top, Self::Middle, Self::Bottom, Self::LongShort, Self::Market];
}
