//! Sales growth signal.

use serde::{Deserialize, Serialize};
use tercile_primitives::Panel;
use tercile_traits::PanelSignal;

/// Which earlier observation sales growth is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthAdjacency {
    /// The entity's preceding row in the cleaned panel, whatever its period.
    #[default]
    Sequence,
    /// The entity's preceding row, only if it belongs to the immediately prior period.
    Calendar,
}

/// Percentage change in net sales against the entity's previous observation.
///
/// Undefined for the first observation of each entity, when the previous value is zero
/// and (under [`GrowthAdjacency::Calendar`]) when a period is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesGrowth {
    adjacency: GrowthAdjacency,
}

impl SalesGrowth {
    /// Create a sales growth signal with the given adjacency rule.
    #[must_use]
    pub const fn new(adjacency: GrowthAdjacency) -> Self {
        Self { adjacency }
    }

    /// Get the adjacency rule.
    #[must_use]
    pub const fn adjacency(&self) -> GrowthAdjacency {
        self.adjacency
    }
}

impl PanelSignal for SalesGrowth {
    fn name(&self) -> &str {
        "sales_growth"
    }

    fn compute(&self, panel: &Panel) -> Vec<Option<f64>> {
        let rows = panel.observations();
        rows.iter()
            .enumerate()
            .map(|(i, cur)| {
                let prev = rows[..i].last().filter(|p| p.entity == cur.entity)?;
                let gap = prev.period.next() != cur.period;
                if self.adjacency == GrowthAdjacency::Calendar && gap {
                    return None;
                }
                let growth = cur.net_sales / prev.net_sales - 1.0;
                growth.is_finite().then_some(growth)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;
    use tercile_primitives::{Date, Observation, Period};

    use super::*;

    fn obs(entity: &str, year: i32, sales: f64) -> Observation {
        Observation {
            entity: entity.into(),
            period: Period(year),
            as_of: Date::from_ymd_opt(year, 12, 31).unwrap(),
            current_assets: 1.0,
            current_liabilities: 1.0,
            net_sales: sales,
        }
    }

    fn panel() -> Panel {
        Panel::new(vec![
            obs("A", 2001, 100.0),
            obs("A", 2002, 110.0),
            obs("A", 2004, 121.0),
            obs("B", 2001, 0.0),
            obs("B", 2002, 50.0),
        ])
    }

    #[test]
    fn first_period_is_undefined() {
        let values = SalesGrowth::default().compute(&panel());
        assert!(values[0].is_none());
        assert!(values[3].is_none());
    }

    #[test]
    fn growth_against_previous_row() {
        let values = SalesGrowth::default().compute(&panel());
        assert_relative_eq!(values[1].unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(values[2].unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn zero_base_is_undefined() {
        let values = SalesGrowth::default().compute(&panel());
        assert!(values[4].is_none());
    }

    #[rstest]
    #[case(GrowthAdjacency::Sequence, true)]
    #[case(GrowthAdjacency::Calendar, false)]
    fn gap_handling(#[case] adjacency: GrowthAdjacency, #[case] defined: bool) {
        let values = SalesGrowth::new(adjacency).compute(&panel());
        assert_eq!(values[2].is_some(), defined);
    }
}
