//! Cleaned firm-period fundamentals.

use serde::{Deserialize, Serialize};

use crate::{Date, EntityId, Period};

/// One firm's fundamentals for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Firm identifier.
    pub entity: EntityId,
    /// Reporting period derived from `as_of`.
    pub period: Period,
    /// Date the fundamentals refer to.
    pub as_of: Date,
    /// Current assets.
    pub current_assets: f64,
    /// Current liabilities.
    pub current_liabilities: f64,
    /// Net sales.
    pub net_sales: f64,
}

/// Cleaned panel of observations, sorted by (entity, period) with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    observations: Vec<Observation>,
}

impl Panel {
    /// Build a panel, sorting by (entity, period).
    ///
    /// Callers are responsible for key uniqueness; when duplicates are present the one
    /// with the latest `as_of` sorts last.
    #[must_use]
    pub fn new(mut observations: Vec<Observation>) -> Self {
        observations.sort_by(|a, b| {
            (&a.entity, a.period, a.as_of).cmp(&(&b.entity, b.period, b.as_of))
        });
        Self { observations }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in (entity, period) order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Iterate over the observations.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Number of distinct entities.
    #[must_use]
    pub fn n_entities(&self) -> usize {
        self.observations.chunk_by(|a, b| a.entity == b.entity).count()
    }

    /// Distinct periods present, ascending.
    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.observations.iter().map(|o| o.period).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }
}

impl<'a> IntoIterator for &'a Panel {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
