//! Cross-sectional ranks and tercile membership.

use std::collections::{BTreeMap, HashMap};

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{EntityId, Period, PeriodRange};

/// Quantile group index within a period; group 0 holds the best combined ranks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display("tercile {_0}")]
#[serde(transparent)]
pub struct Tercile(pub u8);

impl Tercile {
    /// Most favourable group.
    pub const TOP: Self = Self(0);
    /// Middle group of a three-way split.
    pub const MIDDLE: Self = Self(1);

    /// Least favourable group for a split into `n_groups`.
    #[must_use]
    pub const fn bottom(n_groups: u8) -> Self {
        Self(n_groups.saturating_sub(1))
    }

    /// The group index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Ranks and group of one (entity, period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionalRank {
    /// Firm identifier.
    pub entity: EntityId,
    /// Reporting period.
    pub period: Period,
    /// Current ratio the rank was computed from.
    pub current_ratio: f64,
    /// Sales growth the rank was computed from.
    pub sales_growth: f64,
    /// Rank of the current ratio within the period (1 = highest).
    pub current_ratio_rank: f64,
    /// Rank of sales growth within the period (1 = highest).
    pub sales_growth_rank: f64,
    /// Mean of the two signal ranks.
    pub combined_rank: f64,
    /// Quantile group of the combined rank.
    pub tercile: Tercile,
}

/// Summary statistics of one signal inside one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Sample standard deviation; NaN for a single firm.
    pub std: f64,
}

impl SignalSummary {
    fn of(values: &[f64]) -> Self {
        Self {
            mean: tercile_math::mean(values).unwrap_or(f64::NAN),
            median: tercile_math::median(values).unwrap_or(f64::NAN),
            std: tercile_math::sample_std(values).unwrap_or(f64::NAN),
        }
    }
}

/// Per-group description of the ranked panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TercileSummary {
    /// Group described.
    pub tercile: Tercile,
    /// Number of (entity, period) rows in the group.
    pub n_firms: usize,
    /// Current ratio statistics.
    pub current_ratio: SignalSummary,
    /// Sales growth statistics.
    pub sales_growth: SignalSummary,
}

/// Every ranked (entity, period), ordered by period and then entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedPanel {
    ranks: Vec<CrossSectionalRank>,
    n_groups: u8,
}

impl RankedPanel {
    /// Create a ranked panel.
    #[must_use]
    pub fn new(mut ranks: Vec<CrossSectionalRank>, n_groups: u8) -> Self {
        ranks.sort_by(|a, b| (a.period, &a.entity).cmp(&(b.period, &b.entity)));
        Self { ranks, n_groups }
    }

    /// Number of ranked rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Number of groups each period was split into.
    #[must_use]
    pub const fn n_groups(&self) -> u8 {
        self.n_groups
    }

    /// All ranked rows.
    #[must_use]
    pub fn ranks(&self) -> &[CrossSectionalRank] {
        &self.ranks
    }

    /// Iterate over the ranked rows.
    pub fn iter(&self) -> std::slice::Iter<'_, CrossSectionalRank> {
        self.ranks.iter()
    }

    /// Periods with at least one ranked firm, ascending.
    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.ranks.iter().map(|r| r.period).collect();
        periods.dedup();
        periods
    }

    /// Group of every (entity, period).
    #[must_use]
    pub fn membership(&self) -> HashMap<(EntityId, Period), Tercile> {
        self.ranks.iter().map(|r| ((r.entity.clone(), r.period), r.tercile)).collect()
    }

    /// Mean, median and standard deviation of both signals for each group.
    #[must_use]
    pub fn tercile_summary(&self) -> Vec<TercileSummary> {
        let mut groups: BTreeMap<Tercile, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for r in &self.ranks {
            let entry = groups.entry(r.tercile).or_default();
            entry.0.push(r.current_ratio);
            entry.1.push(r.sales_growth);
        }
        groups
            .into_iter()
            .map(|(tercile, (cr, sg))| TercileSummary {
                tercile,
                n_firms: cr.len(),
                current_ratio: SignalSummary::of(&cr),
                sales_growth: SignalSummary::of(&sg),
            })
            .collect()
    }

    /// Share of all ranked rows that falls in each group.
    #[must_use]
    pub fn tercile_distribution(&self) -> Vec<(Tercile, f64)> {
        let total = self.ranks.len();
        if total == 0 {
            return Vec::new();
        }
        let mut counts: BTreeMap<Tercile, usize> = BTreeMap::new();
        for r in &self.ranks {
            *counts.entry(r.tercile).or_default() += 1;
        }
        counts.into_iter().map(|(t, c)| (t, c as f64 / total as f64)).collect()
    }

    /// Periods in `range` without any ranked firm.
    #[must_use]
    pub fn missing_periods(&self, range: PeriodRange) -> Vec<Period> {
        let present = self.periods();
        range.iter().filter(|p| present.binary_search(p).is_err()).collect()
    }
}
