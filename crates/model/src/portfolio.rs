//! Equal-weighted portfolio construction from tercile membership.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tercile_primitives::{
    Date, EntityId, PortfolioLabel, RankedPanel, ReturnObservation, ReturnSeries, Tercile,
};
use tercile_traits::{CalendarYear, PeriodMapping};

use crate::ModelError;

/// Counts from joining security returns to group membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReport {
    /// Return observations supplied.
    pub returns_in: usize,
    /// Observations dropped for a non-finite value.
    pub non_finite: usize,
    /// Observations whose (entity, period) has no group.
    pub unmatched: usize,
    /// Observations joined to a group.
    pub matched: usize,
    /// Distinct (entity, date) pairs after averaging duplicates.
    pub entity_dates: usize,
}

/// Portfolio return series keyed by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSet {
    series: BTreeMap<PortfolioLabel, ReturnSeries>,
}

impl PortfolioSet {
    /// Create a set from series; a later series replaces an earlier one with the same label.
    #[must_use]
    pub fn new(series: impl IntoIterator<Item = ReturnSeries>) -> Self {
        Self { series: series.into_iter().map(|s| (s.label, s)).collect() }
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series for `label`.
    #[must_use]
    pub fn get(&self, label: PortfolioLabel) -> Option<&ReturnSeries> {
        self.series.get(&label)
    }

    /// The Market series.
    #[must_use]
    pub fn market(&self) -> Option<&ReturnSeries> {
        self.get(PortfolioLabel::Market)
    }

    /// Labels present, in reporting order.
    pub fn labels(&self) -> impl Iterator<Item = PortfolioLabel> + '_ {
        self.series.keys().copied()
    }

    /// Iterate over the series in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = &ReturnSeries> {
        self.series.values()
    }

    /// Dates present in every Top, Bottom, Long-Short and Market series in the set.
    ///
    /// Middle does not take part, so a gap in it never removes dates elsewhere.
    #[must_use]
    pub fn common_dates(&self) -> BTreeSet<Date> {
        let mut series = self.series.values().filter(|s| anchors_alignment(s.label));
        let Some(first) = series.next() else {
            return BTreeSet::new();
        };
        let mut common: BTreeSet<Date> = first.dates().iter().copied().collect();
        for s in series {
            common.retain(|d| s.get(*d).is_some());
        }
        common
    }

    /// Every series restricted to [`Self::common_dates`]; Middle keeps its own dates.
    #[must_use]
    pub fn aligned(&self) -> Self {
        let common = self.common_dates();
        Self::new(self.series.values().map(|s| {
            if anchors_alignment(s.label) { s.restrict_to(&common) } else { s.clone() }
        }))
    }
}

const fn anchors_alignment(label: PortfolioLabel) -> bool {
    !matches!(label, PortfolioLabel::Middle)
}

/// Builds Top, Middle, Bottom, Market and Long-Short return series.
///
/// A return on date `d` for entity `e` joins the group `e` was assigned in the period
/// `mapping.period_of(d)`. On each date a portfolio earns the plain average over the
/// members that have a return that day; members without one are left out rather than
/// counted as zero.
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder<M: PeriodMapping = CalendarYear> {
    mapping: M,
}

impl PortfolioBuilder {
    /// Create a builder using calendar-year membership.
    #[must_use]
    pub const fn new() -> Self {
        Self { mapping: CalendarYear }
    }
}

impl<M: PeriodMapping> PortfolioBuilder<M> {
    /// Create a builder with a custom period mapping.
    #[must_use]
    pub const fn with_mapping(mapping: M) -> Self {
        Self { mapping }
    }

    /// Get the period mapping.
    #[must_use]
    pub const fn mapping(&self) -> &M {
        &self.mapping
    }

    /// Build the portfolio set.
    ///
    /// # Arguments
    /// * `ranked` - Ranked panel providing group membership
    /// * `returns` - Security returns
    ///
    /// # Returns
    /// The portfolio set, each series on its own date index, and join counts.
    ///
    /// # Errors
    /// Returns `ModelError::EmptyPortfolio` if Top, Bottom, Market or Long-Short has no
    /// member return on any date. An empty Middle is left out of the set instead.
    pub fn build(
        &self,
        ranked: &RankedPanel,
        returns: &[ReturnObservation],
    ) -> Result<(PortfolioSet, JoinReport), ModelError> {
        let membership = ranked.membership();
        let n_groups = ranked.n_groups();
        let mut report = JoinReport { returns_in: returns.len(), ..Default::default() };

        // (date, entity) -> (tercile, sum, count)
        let mut joined: BTreeMap<(Date, &EntityId), (Tercile, f64, usize)> = BTreeMap::new();
        for r in returns {
            if !r.value.is_finite() {
                report.non_finite += 1;
                continue;
            }
            let group = self
                .mapping
                .period_of(r.date)
                .and_then(|p| membership.get(&(r.entity.clone(), p)).copied());
            let Some(tercile) = group else {
                report.unmatched += 1;
                continue;
            };
            report.matched += 1;
            let entry = joined.entry((r.date, &r.entity)).or_insert((tercile, 0.0, 0));
            entry.1 += r.value;
            entry.2 += 1;
        }
        report.entity_dates = joined.len();

        let mut sums: BTreeMap<PortfolioLabel, BTreeMap<Date, (f64, usize)>> = BTreeMap::new();
        for (&(date, _), &(tercile, sum, count)) in &joined {
            let value = sum / count as f64;
            for label in labels_for(tercile, n_groups) {
                let slot = sums.entry(label).or_default().entry(date).or_insert((0.0, 0));
                slot.0 += value;
                slot.1 += 1;
            }
        }

        let mut set = BTreeMap::new();
        for label in [PortfolioLabel::Top, PortfolioLabel::Bottom, PortfolioLabel::Market] {
            let points = sums.remove(&label).unwrap_or_default();
            if points.is_empty() {
                return Err(ModelError::EmptyPortfolio { label });
            }
            set.insert(label, mean_series(label, points));
        }
        match sums.remove(&PortfolioLabel::Middle) {
            Some(points) if !points.is_empty() => {
                set.insert(PortfolioLabel::Middle, mean_series(PortfolioLabel::Middle, points));
            }
            _ if n_groups >= 3 => {
                tracing::warn!("middle portfolio has no member returns, leaving it out");
            }
            _ => {}
        }

        let long_short = match (set.get(&PortfolioLabel::Top), set.get(&PortfolioLabel::Bottom)) {
            (Some(top), Some(bottom)) => ReturnSeries::from_points(
                PortfolioLabel::LongShort,
                top.iter().filter_map(|(d, t)| bottom.get(d).map(|b| (d, t - b))),
            ),
            _ => return Err(ModelError::EmptyPortfolio { label: PortfolioLabel::LongShort }),
        };
        if long_short.is_empty() {
            return Err(ModelError::EmptyPortfolio { label: PortfolioLabel::LongShort });
        }
        set.insert(PortfolioLabel::LongShort, long_short);

        tracing::info!(
            returns_in = report.returns_in,
            matched = report.matched,
            unmatched = report.unmatched,
            non_finite = report.non_finite,
            "built portfolios"
        );
        for series in set.values() {
            tracing::debug!(portfolio = %series.label, n_dates = series.len(), "portfolio series");
        }

        Ok((PortfolioSet { series: set }, report))
    }
}

fn mean_series(label: PortfolioLabel, points: BTreeMap<Date, (f64, usize)>) -> ReturnSeries {
    ReturnSeries::from_points(label, points.into_iter().map(|(d, (sum, n))| (d, sum / n as f64)))
}

/// Portfolios an entity in `tercile` contributes to.
fn labels_for(tercile: Tercile, n_groups: u8) -> Vec<PortfolioLabel> {
    let mut labels = vec![PortfolioLabel::Market];
    if tercile == Tercile::TOP {
        labels.push(PortfolioLabel::Top);
    } else if tercile == Tercile::bottom(n_groups) {
        labels.push(PortfolioLabel::Bottom);
    } else {
        labels.push(PortfolioLabel::Middle);
    }
    labels
}
