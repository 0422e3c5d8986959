//! Per-observation signal values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Date, EntityId, Period};

/// Signals computed for one (entity, period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Firm identifier.
    pub entity: EntityId,
    /// Reporting period.
    pub period: Period,
    /// As-of date of the underlying observation.
    pub as_of: Date,
    /// Current assets over current liabilities.
    pub current_ratio: f64,
    /// Period-over-period change in net sales, after winsorization.
    pub sales_growth: f64,
}

/// Signals for every surviving observation, in (entity, period) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalPanel {
    records: Vec<SignalRecord>,
}

impl SignalPanel {
    /// Wrap records that are already in (entity, period) order.
    #[must_use]
    pub const fn new(records: Vec<SignalRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[SignalRecord] {
        &self.records
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, SignalRecord> {
        self.records.iter()
    }

    /// Group records by period, ascending.
    #[must_use]
    pub fn by_period(&self) -> BTreeMap<Period, Vec<&SignalRecord>> {
        let mut groups: BTreeMap<Period, Vec<&SignalRecord>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(record.period).or_default().push(record);
        }
        groups
    }

    /// Look up the record for an (entity, period).
    #[must_use]
    pub fn get(&self, entity: &str, period: Period) -> Option<&SignalRecord> {
        self.records.iter().find(|r| r.entity.as_str() == entity && r.period == period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entity: &str, year: i32, growth: f64) -> SignalRecord {
        SignalRecord {
            entity: entity.into(),
            period: Period(year),
            as_of: Date::from_ymd_opt(year, 12, 31).unwrap(),
            current_ratio: 1.5,
            sales_growth: growth,
        }
    }

    #[test]
    fn groups_by_period_in_order() {
        let panel = SignalPanel::new(vec![
            record("A", 2002, 0.1),
            record("A", 2003, 0.2),
            record("B", 2002, 0.3),
        ]);
        let groups = panel.by_period();
        let periods: Vec<Period> = groups.keys().copied().collect();
        assert_eq!(periods, vec![Period(2002), Period(2003)]);
        assert_eq!(groups[&Period(2002)].len(), 2);
        assert!(panel.get("B", Period(2002)).is_some());
        assert!(panel.get("B", Period(2003)).is_none());
    }
}
