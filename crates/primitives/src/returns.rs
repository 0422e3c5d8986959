//! Return type definitions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Date, EntityId, PortfolioLabel, SampleWindow};

/// One security return on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    /// Security identifier.
    pub entity: EntityId,
    /// Trading date.
    pub date: Date,
    /// Simple return for the date.
    pub value: f64,
}

impl ReturnObservation {
    /// Create a new return observation.
    #[must_use]
    pub fn new(entity: impl Into<EntityId>, date: Date, value: f64) -> Self {
        Self { entity: entity.into(), date, value }
    }
}

/// Returns read from a source together with the number of records that could not be used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedReturns {
    /// Parsed observations.
    pub observations: Vec<ReturnObservation>,
    /// Records skipped for a missing identifier, date or value.
    pub skipped: usize,
}

/// Date-indexed series for one portfolio, strictly increasing in date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    /// Portfolio the series belongs to.
    pub label: PortfolioLabel,
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Build a series from a date-ordered map.
    #[must_use]
    pub fn from_map(label: PortfolioLabel, points: BTreeMap<Date, f64>) -> Self {
        let (dates, values) = points.into_iter().unzip();
        Self { label, dates, values }
    }

    /// Build a series from arbitrary points; later points win on duplicate dates.
    #[must_use]
    pub fn from_points(
        label: PortfolioLabel,
        points: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        Self::from_map(label, points.into_iter().collect())
    }

    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates, ascending.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Values aligned with [`Self::dates`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (date, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Value on `date`, if present.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.dates.binary_search(&date).ok().map(|i| self.values[i])
    }

    /// Restrict to dates inside a sample window.
    #[must_use]
    pub fn window(&self, window: &SampleWindow) -> Self {
        self.filter(|d| window.contains(d))
    }

    /// Restrict to dates contained in `dates`.
    #[must_use]
    pub fn restrict_to(&self, dates: &BTreeSet<Date>) -> Self {
        self.filter(|d| dates.contains(&d))
    }

    /// Values of `self` and `other` on the dates both series share.
    #[must_use]
    pub fn paired_with(&self, other: &Self) -> (Vec<f64>, Vec<f64>) {
        self.iter().filter_map(|(d, v)| other.get(d).map(|o| (v, o))).unzip()
    }

    /// Running product of `1 + r`.
    #[must_use]
    pub fn cumulative(&self) -> Self {
        Self {
            label: self.label,
            dates: self.dates.clone(),
            values: tercile_math::cumulative_returns(&self.values),
        }
    }

    /// Drawdown of the cumulative series from its running peak.
    #[must_use]
    pub fn drawdown(&self) -> Self {
        Self {
            label: self.label,
            dates: self.dates.clone(),
            values: tercile_math::drawdowns(&tercile_math::cumulative_returns(&self.values)),
        }
    }

    fn filter(&self, keep: impl Fn(Date) -> bool) -> Self {
        let (dates, values) = self.iter().filter(|(d, _)| keep(*d)).unzip();
        Self { label: self.label, dates, values }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2015, 12, d).unwrap()
    }

    fn series(label: PortfolioLabel, points: &[(u32, f64)]) -> ReturnSeries {
        ReturnSeries::from_points(label, points.iter().map(|&(d, v)| (day(d), v)))
    }

    #[test]
    fn points_are_sorted() {
        let s = series(PortfolioLabel::Top, &[(3, 0.3), (1, 0.1), (2, 0.2)]);
        assert_eq!(s.dates(), &[day(1), day(2), day(3)]);
        assert_eq!(s.values(), &[0.1, 0.2, 0.3]);
        assert_eq!(s.get(day(2)), Some(0.2));
        assert_eq!(s.get(day(4)), None);
    }

    #[test]
    fn pairs_on_shared_dates() {
        let a = series(PortfolioLabel::Top, &[(1, 0.1), (2, 0.2), (3, 0.3)]);
        let b = series(PortfolioLabel::Market, &[(2, -0.2), (3, -0.3), (4, -0.4)]);
        let (x, y) = a.paired_with(&b);
        assert_eq!(x, vec![0.2, 0.3]);
        assert_eq!(y, vec![-0.2, -0.3]);
    }

    #[test]
    fn window_is_half_open() {
        let s = series(PortfolioLabel::Top, &[(30, 0.1), (31, 0.2)]);
        let w = SampleWindow::new("w", None, Some(day(31)));
        assert_eq!(s.window(&w).dates(), &[day(30)]);
    }

    #[test]
    fn cumulative_and_drawdown() {
        let s = series(PortfolioLabel::Bottom, &[(1, 0.1), (2, -0.5), (3, 0.2)]);
        let cum = s.cumulative();
        assert_relative_eq!(cum.values()[2], 1.1 * 0.5 * 1.2, epsilon = 1e-12);
        let dd = s.drawdown();
        assert_relative_eq!(dd.values()[0], 0.0);
        assert_relative_eq!(dd.values()[1], -0.5, epsilon = 1e-12);
    }
}
