//! Raw fundamentals cleaning.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tercile_primitives::{Observation, Panel, Period, PeriodRange, Universe};
use tercile_utils::{UtilsError, date_column, float_column, has_column, string_column};

use crate::{PanelError, PanelSchema};

/// Configuration for the panel cleaner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Column names.
    pub schema: PanelSchema,
    /// Administrative columns removed before cleaning; absent names are ignored.
    pub drop_columns: Vec<String>,
    /// Inclusive range of periods kept.
    pub period_range: PeriodRange,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            schema: PanelSchema::default(),
            drop_columns: vec![
                "Global Company Key".to_string(),
                "Data Year - Fiscal".to_string(),
                "Earnings Per Share (Diluted) - Excluding Extraordinary Items".to_string(),
            ],
            period_range: PeriodRange::default(),
        }
    }
}

/// Row counts for every reason the cleaner removed a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows in the raw table.
    pub rows_in: usize,
    /// Rows whose entity is missing or not in the universe.
    pub outside_universe: usize,
    /// Rows whose as-of date could not be parsed.
    pub bad_dates: usize,
    /// Rows whose period falls outside the configured range.
    pub out_of_range: usize,
    /// Rows missing current assets, current liabilities or net sales.
    pub missing_fields: usize,
    /// Rows superseded by a later as-of date for the same (entity, period).
    pub duplicates_dropped: usize,
    /// Rows in the cleaned panel.
    pub rows_kept: usize,
    /// Drop-list columns that were present in the raw table.
    pub dropped_columns: Vec<String>,
}

/// Restricts a raw fundamentals table to a clean, sorted firm-period panel.
#[derive(Debug, Clone, Default)]
pub struct PanelCleaner {
    config: CleanerConfig,
}

impl PanelCleaner {
    /// Create a new cleaner with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CleanerConfig::default())
    }

    /// Create a cleaner with the given configuration.
    #[must_use]
    pub const fn with_config(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Clean a raw fundamentals table.
    ///
    /// Filters are applied in order: universe membership, date parsing, period range,
    /// completeness of the three numeric inputs. Of several rows sharing an
    /// (entity, period) the one with the latest as-of date is kept.
    ///
    /// # Arguments
    /// * `raw` - Fundamentals as loaded
    /// * `universe` - Admissible entities
    ///
    /// # Returns
    /// The cleaned panel and a report of removed rows.
    ///
    /// # Errors
    /// Returns `PanelError::Schema` if any schema column is absent after the drop list
    /// is applied.
    pub fn clean(
        &self,
        raw: &DataFrame,
        universe: &Universe,
    ) -> Result<(Panel, CleaningReport), PanelError> {
        let schema = &self.config.schema;
        let mut report = CleaningReport { rows_in: raw.height(), ..Default::default() };

        report.dropped_columns = self
            .config
            .drop_columns
            .iter()
            .filter(|c| has_column(raw, c))
            .cloned()
            .collect();
        let kept: Vec<&str> = raw
            .get_column_names()
            .into_iter()
            .map(|c| c.as_str())
            .filter(|c| !report.dropped_columns.iter().any(|d| d == c))
            .collect();
        let frame = raw.select(kept)?;

        if let Some(missing) = schema.required().into_iter().find(|c| !has_column(&frame, c)) {
            return Err(PanelError::Schema(missing.to_string()));
        }

        let entities = string_column(&frame, &schema.entity).map_err(schema_error)?;
        let dates = date_column(&frame, &schema.as_of).map_err(schema_error)?;
        let assets = float_column(&frame, &schema.current_assets).map_err(schema_error)?;
        let liabilities =
            float_column(&frame, &schema.current_liabilities).map_err(schema_error)?;
        let sales = float_column(&frame, &schema.net_sales).map_err(schema_error)?;

        let range = self.config.period_range;
        let mut observations = Vec::with_capacity(frame.height());
        for i in 0..frame.height() {
            let Some(entity) = entities[i].as_deref().filter(|e| universe.contains(e)) else {
                report.outside_universe += 1;
                continue;
            };
            let Some(as_of) = dates[i] else {
                report.bad_dates += 1;
                continue;
            };
            let period = Period::of_date(as_of);
            if !range.contains(period) {
                report.out_of_range += 1;
                continue;
            }
            let (Some(current_assets), Some(current_liabilities), Some(net_sales)) =
                (assets[i], liabilities[i], sales[i])
            else {
                report.missing_fields += 1;
                continue;
            };
            observations.push(Observation {
                entity: entity.into(),
                period,
                as_of,
                current_assets,
                current_liabilities,
                net_sales,
            });
        }

        let before = observations.len();
        let panel = Panel::new(observations);
        let panel = keep_latest(panel);
        report.duplicates_dropped = before - panel.len();
        report.rows_kept = panel.len();

        tracing::info!(
            rows_in = report.rows_in,
            rows_kept = report.rows_kept,
            outside_universe = report.outside_universe,
            bad_dates = report.bad_dates,
            out_of_range = report.out_of_range,
            missing_fields = report.missing_fields,
            duplicates_dropped = report.duplicates_dropped,
            "cleaned fundamentals panel"
        );
        if report.duplicates_dropped > 0 {
            tracing::debug!(
                count = report.duplicates_dropped,
                "kept latest as-of date for repeated (entity, period) keys"
            );
        }

        Ok((panel, report))
    }
}

fn schema_error(err: UtilsError) -> PanelError {
    match err {
        UtilsError::MissingColumn(name) => PanelError::Schema(name),
        other => PanelError::Utils(other),
    }
}

/// Drop all but the last row of each (entity, period) run in a sorted panel.
fn keep_latest(panel: Panel) -> Panel {
    let rows = panel.observations();
    let kept: Vec<Observation> = rows
        .iter()
        .enumerate()
        .filter(|(i, o)| {
            rows.get(i + 1).is_none_or(|next| next.entity != o.entity || next.period != o.period)
        })
        .map(|(_, o)| o.clone())
        .collect();
    Panel::new(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Universe {
        ["AAA", "BBB"].into_iter().collect()
    }

    fn raw() -> DataFrame {
        df! {
            "Global Company Key" => &[1_i64, 1, 2, 2, 3, 1],
            "Ticker Symbol" => &["AAA", "AAA", "BBB", "BBB", "ZZZ", "AAA"],
            "Data Date" => &[
                "2001-12-31", "2002-12-31", "2001-12-31", "not a date", "2001-12-31", "1999-12-31",
            ],
            "Current Assets - Total" => &[10.0, 12.0, 5.0, 5.0, 1.0, 9.0],
            "Current Liabilities - Total" => &[
                Some(5.0), None, Some(5.0), Some(5.0), Some(1.0), Some(3.0),
            ],
            "Sales/Turnover (Net)" => &[100.0, 110.0, 50.0, 55.0, 1.0, 90.0],
        }
        .unwrap()
    }

    #[test]
    fn cleaner_config_defaults() {
        let config = CleanerConfig::default();
        assert_eq!(config.period_range, PeriodRange::new(Period(2000), Period(2022)));
        assert_eq!(config.drop_columns.len(), 3);
        assert_eq!(config.schema.entity, "Ticker Symbol");
    }

    #[test]
    fn filters_are_counted() {
        let (panel, report) = PanelCleaner::new().clean(&raw(), &universe()).unwrap();

        assert_eq!(report.rows_in, 6);
        assert_eq!(report.outside_universe, 1);
        assert_eq!(report.bad_dates, 1);
        assert_eq!(report.out_of_range, 1);
        assert_eq!(report.missing_fields, 1);
        assert_eq!(report.duplicates_dropped, 0);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(report.dropped_columns, vec!["Global Company Key".to_string()]);

        let keys: Vec<(&str, i32)> =
            panel.iter().map(|o| (o.entity.as_str(), o.period.year())).collect();
        assert_eq!(keys, vec![("AAA", 2001), ("BBB", 2001)]);
    }

    #[test]
    fn missing_date_column_is_schema_error() {
        let df = df! {
            "Ticker Symbol" => &["AAA"],
            "Current Assets - Total" => &[1.0],
            "Current Liabilities - Total" => &[1.0],
            "Sales/Turnover (Net)" => &[1.0],
        }
        .unwrap();
        let err = PanelCleaner::new().clean(&df, &universe()).unwrap_err();
        assert!(matches!(err, PanelError::Schema(c) if c == "Data Date"));
    }

    #[test]
    fn missing_entity_column_is_schema_error() {
        let df = df! { "Data Date" => &["2001-12-31"] }.unwrap();
        let err = PanelCleaner::new().clean(&df, &universe()).unwrap_err();
        assert!(matches!(err, PanelError::Schema(c) if c == "Ticker Symbol"));
    }

    #[test]
    fn duplicate_period_keeps_latest_as_of() {
        let df = df! {
            "Ticker Symbol" => &["AAA", "AAA", "AAA"],
            "Data Date" => &["2005-12-31", "2005-06-30", "2006-06-30"],
            "Current Assets - Total" => &[2.0, 1.0, 3.0],
            "Current Liabilities - Total" => &[1.0, 1.0, 1.0],
            "Sales/Turnover (Net)" => &[20.0, 10.0, 30.0],
        }
        .unwrap();
        let (panel, report) = PanelCleaner::new().clean(&df, &universe()).unwrap();

        assert_eq!(report.duplicates_dropped, 1);
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.observations()[0].net_sales, 20.0);
    }

    #[test]
    fn custom_range_and_empty_drop_list() {
        let config = CleanerConfig {
            drop_columns: Vec::new(),
            period_range: PeriodRange::new(Period(1999), Period(2001)),
            ..Default::default()
        };
        let cleaner = PanelCleaner::with_config(config);
        let (panel, report) = cleaner.clean(&raw(), &universe()).unwrap();

        assert!(report.dropped_columns.is_empty());
        assert_eq!(report.out_of_range, 1);
        assert_eq!(panel.len(), 3);
    }
}
