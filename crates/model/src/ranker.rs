//! Cross-sectional ranking and tercile assignment.

use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tercile_math::{MathError, RankOrder, average_rank, distinct_count, quantile_bins};
use tercile_primitives::{
    CrossSectionalRank, Period, RankedPanel, SignalPanel, SignalRecord, Tercile,
};

use crate::ModelError;

/// What to do with a period that cannot be split into the requested groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientPeriodPolicy {
    /// Leave the period out and record it in the report.
    #[default]
    Skip,
    /// Fail the whole ranking.
    Abort,
}

/// Configuration for the cross-sectional ranker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Number of equal-frequency groups per period.
    pub n_groups: u8,
    /// Handling of periods with too few distinct combined ranks.
    pub policy: InsufficientPeriodPolicy,
    /// Rank periods on the rayon thread pool.
    pub parallel: bool,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self { n_groups: 3, policy: InsufficientPeriodPolicy::Skip, parallel: true }
    }
}

/// A period left out of the ranked panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPeriod {
    /// Period affected.
    pub period: Period,
    /// Firms in the period.
    pub n_firms: usize,
    /// Distinct combined-rank values in the period.
    pub distinct: usize,
}

/// Outcome of a ranking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingReport {
    /// Periods that were ranked.
    pub periods_ranked: usize,
    /// Firms that received a group.
    pub firms_ranked: usize,
    /// Periods left out, in period order.
    pub skipped: Vec<SkippedPeriod>,
}

/// Ranks both signals within each period and splits the combined rank into groups.
///
/// Ranks are descending (1 = highest signal) with averaged ties. The combined rank is the
/// mean of the two, and group 0 holds the lowest combined ranks, i.e. the strongest firms.
#[derive(Debug, Clone, Default)]
pub struct CrossSectionalRanker {
    config: RankerConfig,
}

impl CrossSectionalRanker {
    /// Create a new ranker with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RankerConfig::default())
    }

    /// Create a ranker with the given configuration.
    #[must_use]
    pub const fn with_config(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank the firms of a single period.
    ///
    /// # Arguments
    /// * `period` - Period the records belong to
    /// * `records` - Every signal record of the period
    ///
    /// # Returns
    /// One rank per record, in input order.
    ///
    /// # Errors
    /// * `ModelError::InvalidConfig` if fewer than two groups are requested
    /// * `ModelError::InsufficientCrossSection` if the combined ranks cannot be split
    pub fn rank_period(
        &self,
        period: Period,
        records: &[&SignalRecord],
    ) -> Result<Vec<CrossSectionalRank>, ModelError> {
        let n_groups = self.validated_groups()?;

        let current_ratio: Array1<f64> = records.iter().map(|r| r.current_ratio).collect();
        let sales_growth: Array1<f64> = records.iter().map(|r| r.sales_growth).collect();
        let cr_rank = average_rank(&current_ratio, RankOrder::Descending);
        let sg_rank = average_rank(&sales_growth, RankOrder::Descending);
        let combined = (&cr_rank + &sg_rank) / 2.0;

        let bins = quantile_bins(&combined, n_groups).map_err(|e| match e {
            MathError::InsufficientDistinct { .. } | MathError::NonIncreasingEdges => {
                ModelError::InsufficientCrossSection {
                    period,
                    distinct: distinct_count(&combined),
                    required: n_groups,
                }
            }
            other => ModelError::Math(other),
        })?;

        Ok(records
            .iter()
            .enumerate()
            .map(|(i, r)| CrossSectionalRank {
                entity: r.entity.clone(),
                period,
                current_ratio: r.current_ratio,
                sales_growth: r.sales_growth,
                current_ratio_rank: cr_rank[i],
                sales_growth_rank: sg_rank[i],
                combined_rank: combined[i],
                tercile: Tercile(bins[i] as u8),
            })
            .collect())
    }

    /// Rank every period of a signal panel.
    ///
    /// # Arguments
    /// * `signals` - Winsorized signal panel
    ///
    /// # Returns
    /// The ranked panel and a report listing skipped periods.
    ///
    /// # Errors
    /// * `ModelError::InvalidConfig` if fewer than two groups are requested
    /// * `ModelError::InsufficientCrossSection` for the first unsplittable period when the
    ///   policy is [`InsufficientPeriodPolicy::Abort`]
    pub fn rank(&self, signals: &SignalPanel) -> Result<(RankedPanel, RankingReport), ModelError> {
        let n_groups = self.validated_groups()?;
        let by_period: Vec<(Period, Vec<&SignalRecord>)> =
            signals.by_period().into_iter().collect();

        let rank_one = |(period, records): &(Period, Vec<&SignalRecord>)| {
            let result = self.rank_period(*period, records);
            (*period, records.len(), result)
        };
        // Both paths preserve period order.
        let outcomes: Vec<_> = if self.config.parallel {
            by_period.par_iter().map(rank_one).collect()
        } else {
            by_period.iter().map(rank_one).collect()
        };

        let mut report = RankingReport::default();
        let mut ranks = Vec::with_capacity(signals.len());
        for (period, n_firms, outcome) in outcomes {
            match outcome {
                Ok(period_ranks) => {
                    tracing::debug!(
                        period = period.year(),
                        n_firms = period_ranks.len(),
                        "ranked period"
                    );
                    report.periods_ranked += 1;
                    ranks.extend(period_ranks);
                }
                Err(ModelError::InsufficientCrossSection { distinct, .. })
                    if self.config.policy == InsufficientPeriodPolicy::Skip =>
                {
                    tracing::warn!(
                        period = period.year(),
                        n_firms,
                        distinct,
                        "skipping period with too few distinct combined ranks"
                    );
                    report.skipped.push(SkippedPeriod { period, n_firms, distinct });
                }
                Err(e) => return Err(e),
            }
        }
        report.firms_ranked = ranks.len();

        tracing::info!(
            periods_ranked = report.periods_ranked,
            periods_skipped = report.skipped.len(),
            firms_ranked = report.firms_ranked,
            "ranked signal panel"
        );

        Ok((RankedPanel::new(ranks, n_groups as u8), report))
    }

    fn validated_groups(&self) -> Result<usize, ModelError> {
        if self.config.n_groups < 2 {
            return Err(ModelError::InvalidConfig(format!(
                "n_groups must be at least 2, got {}",
                self.config.n_groups
            )));
        }
        Ok(usize::from(self.config.n_groups))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;
    use tercile_primitives::Date;

    use super::*;

    fn record(entity: &str, year: i32, cr: f64, sg: f64) -> SignalRecord {
        SignalRecord {
            entity: entity.into(),
            period: Period(year),
            as_of: Date::from_ymd_opt(year, 12, 31).unwrap(),
            current_ratio: cr,
            sales_growth: sg,
        }
    }

    /// Nine firms whose two signals agree, so combined ranks are 1..=9.
    fn nine_firms(year: i32) -> Vec<SignalRecord> {
        (1..=9)
            .map(|i| record(&format!("F{i}"), year, f64::from(10 - i), f64::from(10 - i) / 10.0))
            .collect()
    }

    #[test]
    fn ranker_config_defaults() {
        let config = RankerConfig::default();
        assert_eq!(config.n_groups, 3);
        assert_eq!(config.policy, InsufficientPeriodPolicy::Skip);
        assert!(config.parallel);
    }

    #[test]
    fn nine_firms_split_three_ways() {
        let signals = SignalPanel::new(nine_firms(2010));
        let (ranked, report) = CrossSectionalRanker::new().rank(&signals).unwrap();

        assert_eq!(report.periods_ranked, 1);
        assert!(report.skipped.is_empty());
        for t in 0..3u8 {
            let members: Vec<&str> = ranked
                .iter()
                .filter(|r| r.tercile == Tercile(t))
                .map(|r| r.entity.as_str())
                .collect();
            assert_eq!(members.len(), 3);
        }
        let top: Vec<&str> = ranked
            .iter()
            .filter(|r| r.tercile == Tercile::TOP)
            .map(|r| r.entity.as_str())
            .collect();
        assert_eq!(top, vec!["F1", "F2", "F3"]);
    }

    #[test]
    fn combined_rank_is_mean_of_signal_ranks() {
        let records = vec![
            record("A", 2010, 3.0, 0.1),
            record("B", 2010, 2.0, 0.3),
            record("C", 2010, 1.0, 0.2),
        ];
        let refs: Vec<&SignalRecord> = records.iter().collect();
        let ranks = CrossSectionalRanker::new().rank_period(Period(2010), &refs).unwrap();

        assert_relative_eq!(ranks[0].current_ratio_rank, 1.0);
        assert_relative_eq!(ranks[0].sales_growth_rank, 3.0);
        assert_relative_eq!(ranks[0].combined_rank, 2.0);
        assert_relative_eq!(ranks[1].combined_rank, 1.5);
        assert_relative_eq!(ranks[2].combined_rank, 2.5);
        assert_eq!(ranks[1].tercile, Tercile::TOP);
        assert_eq!(ranks[2].tercile, Tercile::bottom(3));
    }

    #[test]
    fn ties_share_average_rank() {
        let records = vec![
            record("A", 2010, 2.0, 0.5),
            record("B", 2010, 2.0, 0.5),
            record("C", 2010, 1.0, 0.1),
            record("D", 2010, 0.5, 0.0),
        ];
        let refs: Vec<&SignalRecord> = records.iter().collect();
        let config = RankerConfig { n_groups: 2, ..Default::default() };
        let ranks = CrossSectionalRanker::with_config(config)
            .rank_period(Period(2010), &refs)
            .unwrap();

        assert_relative_eq!(ranks[0].current_ratio_rank, 1.5);
        assert_relative_eq!(ranks[1].combined_rank, 1.5);
        assert_eq!(ranks[0].tercile, Tercile::TOP);
        assert_eq!(ranks[1].tercile, Tercile::TOP);
        assert_eq!(ranks[2].tercile, Tercile::bottom(2));
    }

    #[test]
    fn terciles_within_each_period_are_balanced() {
        let mut records = nine_firms(2010);
        records.extend(nine_firms(2011));
        let (ranked, _) = CrossSectionalRanker::new().rank(&SignalPanel::new(records)).unwrap();

        assert_eq!(ranked.periods(), vec![Period(2010), Period(2011)]);
        for period in ranked.periods() {
            for t in 0..3u8 {
                let count =
                    ranked.iter().filter(|r| r.period == period && r.tercile == Tercile(t)).count();
                assert_eq!(count, 3);
            }
        }
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn small_period_is_skipped(#[case] parallel: bool) {
        let mut records = nine_firms(2010);
        records.push(record("X", 2011, 1.0, 0.1));
        records.push(record("Y", 2011, 2.0, 0.2));
        let config = RankerConfig { parallel, ..Default::default() };
        let (ranked, report) = CrossSectionalRanker::with_config(config)
            .rank(&SignalPanel::new(records))
            .unwrap();

        assert_eq!(ranked.len(), 9);
        assert_eq!(report.periods_ranked, 1);
        assert_eq!(
            report.skipped,
            vec![SkippedPeriod { period: Period(2011), n_firms: 2, distinct: 2 }]
        );
    }

    #[test]
    fn small_period_aborts_when_requested() {
        let mut records = nine_firms(2010);
        records.push(record("X", 2011, 1.0, 0.1));
        let config =
            RankerConfig { policy: InsufficientPeriodPolicy::Abort, ..Default::default() };
        let err = CrossSectionalRanker::with_config(config)
            .rank(&SignalPanel::new(records))
            .unwrap_err();

        assert!(matches!(
            err,
            ModelError::InsufficientCrossSection { period: Period(2011), distinct: 1, required: 3 }
        ));
    }

    #[test]
    fn tied_edges_are_insufficient() {
        // Combined ranks 2, 2, 2, 5, 5, 5 give only two distinct values.
        let records: Vec<SignalRecord> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let v = if i < 3 { 2.0 } else { 1.0 };
                record(e, 2010, v, v)
            })
            .collect();
        let refs: Vec<&SignalRecord> = records.iter().collect();
        let err = CrossSectionalRanker::new().rank_period(Period(2010), &refs).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let mut records = Vec::new();
        for year in 2001..2010 {
            records.extend(nine_firms(year));
        }
        let signals = SignalPanel::new(records);
        let sequential = RankerConfig { parallel: false, ..Default::default() };

        let (a, _) = CrossSectionalRanker::new().rank(&signals).unwrap();
        let (b, _) = CrossSectionalRanker::with_config(sequential).rank(&signals).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_group_is_rejected() {
        let config = RankerConfig { n_groups: 1, ..Default::default() };
        let err = CrossSectionalRanker::with_config(config)
            .rank(&SignalPanel::new(nine_firms(2010)))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }
}
