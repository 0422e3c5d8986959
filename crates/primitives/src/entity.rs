//! Entity and period identifiers.

use std::{borrow::Borrow, collections::BTreeSet};

use chrono::Datelike;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::Date;

/// Identifier of a firm in the panel (typically a ticker symbol).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create a new entity identifier.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Reporting period, expressed as a year.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Period(pub i32);

impl Period {
    /// Create a new period.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    /// The calendar year containing `date`.
    #[must_use]
    pub fn of_date(date: Date) -> Self {
        Self(date.year())
    }

    /// The year value.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.0
    }

    /// The period immediately following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Inclusive range of periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    /// First period kept.
    pub start: Period,
    /// Last period kept.
    pub end: Period,
}

impl PeriodRange {
    /// Create a new inclusive range.
    #[must_use]
    pub const fn new(start: Period, end: Period) -> Self {
        Self { start, end }
    }

    /// Whether `period` lies inside the range.
    #[must_use]
    pub fn contains(&self, period: Period) -> bool {
        self.start <= period && period <= self.end
    }

    /// Iterate over every period of the range.
    pub fn iter(&self) -> impl Iterator<Item = Period> + use<> {
        (self.start.0..=self.end.0).map(Period)
    }
}

impl Default for PeriodRange {
    fn default() -> Self {
        Self::new(Period(2000), Period(2022))
    }
}

/// Whitelist of entities admitted to the panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Universe(BTreeSet<EntityId>);

impl Universe {
    /// Create an empty universe.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add an entity.
    pub fn insert(&mut self, entity: impl Into<EntityId>) -> bool {
        self.0.insert(entity.into())
    }

    /// Whether the identifier is admitted.
    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.0.contains(entity)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entities in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.0.iter()
    }
}

impl<T: Into<EntityId>> FromIterator<T> for Universe {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_from_str() {
        let id: EntityId = "AAPL".into();
        assert_eq!(id.as_str(), "AAPL");
        assert_eq!(id.to_string(), "AAPL");
    }

    #[test]
    fn period_of_date() {
        let date = Date::from_ymd_opt(2014, 6, 30).unwrap();
        assert_eq!(Period::of_date(date), Period(2014));
        assert_eq!(Period(2014).next(), Period(2015));
    }

    #[test]
    fn period_range_default_bounds() {
        let range = PeriodRange::default();
        assert!(range.contains(Period(2000)));
        assert!(range.contains(Period(2022)));
        assert!(!range.contains(Period(1999)));
        assert!(!range.contains(Period(2023)));
        assert_eq!(range.iter().count(), 23);
    }

    #[test]
    fn universe_membership() {
        let universe: Universe = ["AAPL", "MSFT"].into_iter().collect();
        assert!(universe.contains("AAPL"));
        assert!(!universe.contains("GOOG"));
        assert_eq!(universe.len(), 2);
    }
}
