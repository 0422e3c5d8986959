//! Column names of the raw fundamentals table.

use serde::{Deserialize, Serialize};

/// Names of the columns the cleaner reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSchema {
    /// Entity identifier column.
    pub entity: String,
    /// As-of date column.
    pub as_of: String,
    /// Current assets column.
    pub current_assets: String,
    /// Current liabilities column.
    pub current_liabilities: String,
    /// Net sales column.
    pub net_sales: String,
}

impl Default for PanelSchema {
    fn default() -> Self {
        Self {
            entity: "Ticker Symbol".to_string(),
            as_of: "Data Date".to_string(),
            current_assets: "Current Assets - Total".to_string(),
            current_liabilities: "Current Liabilities - Total".to_string(),
            net_sales: "Sales/Turnover (Net)".to_string(),
        }
    }
}

impl PanelSchema {
    /// Every column the cleaner needs, identifiers first.
    #[must_use]
    pub fn required(&self) -> [&str; 5] {
        [
            self.entity.as_str(),
            self.as_of.as_str(),
            self.current_assets.as_str(),
            self.current_liabilities.as_str(),
            self.net_sales.as_str(),
        ]
    }
}
