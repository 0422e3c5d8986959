//! CSV loaders for fundamentals and security returns.

use std::path::Path;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tercile_primitives::{LoadedReturns, ReturnObservation};
use tercile_traits::{CollaboratorError, Loader};
use tercile_utils::{UtilsError, date_column, float_column, string_column};

/// Column names of the returns file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnColumns {
    /// Security identifier column.
    pub entity: String,
    /// Trading date column.
    pub date: String,
    /// Daily return column.
    pub value: String,
}

impl Default for ReturnColumns {
    fn default() -> Self {
        Self { entity: "TICKER".to_string(), date: "date".to_string(), value: "vwretd".to_string() }
    }
}

/// Reads fundamentals and returns from CSV files with a header row.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    returns: ReturnColumns,
    infer_schema_length: Option<usize>,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { returns: ReturnColumns::default(), infer_schema_length: Some(10_000) }
    }
}

impl CsvLoader {
    /// Create a loader with default column names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom return columns.
    #[must_use]
    pub fn with_return_columns(returns: ReturnColumns) -> Self {
        Self { returns, ..Self::default() }
    }

    /// Rows scanned to infer fundamentals column types; `None` scans the whole file.
    #[must_use]
    pub const fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    /// Get the return column names.
    #[must_use]
    pub const fn return_columns(&self) -> &ReturnColumns {
        &self.returns
    }

    fn read(path: &Path, infer_schema_length: Option<usize>) -> PolarsResult<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(infer_schema_length)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
    }
}

impl Loader for CsvLoader {
    type Source = Path;

    fn load_panel(&self, source: &Path) -> Result<DataFrame, CollaboratorError> {
        let df = Self::read(source, self.infer_schema_length)?;
        tracing::info!(
            path = %source.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded fundamentals"
        );
        Ok(df)
    }

    /// Every column is read as text so that return codes mixed into numeric columns do
    /// not fail type inference; such values count as skipped.
    fn load_returns(&self, source: &Path) -> Result<LoadedReturns, CollaboratorError> {
        let df = Self::read(source, Some(0))?;
        let cols = &self.returns;
        let entities = string_column(&df, &cols.entity).map_err(column_error)?;
        let dates = date_column(&df, &cols.date).map_err(column_error)?;
        let values = float_column(&df, &cols.value).map_err(column_error)?;

        let mut loaded = LoadedReturns::default();
        for ((entity, date), value) in entities.into_iter().zip(dates).zip(values) {
            match (entity, date, value) {
                (Some(entity), Some(date), Some(value)) => {
                    loaded.observations.push(ReturnObservation::new(entity, date, value));
                }
                _ => loaded.skipped += 1,
            }
        }

        tracing::info!(
            path = %source.display(),
            rows = df.height(),
            observations = loaded.observations.len(),
            skipped = loaded.skipped,
            "loaded returns"
        );
        Ok(loaded)
    }
}

fn column_error(err: UtilsError) -> CollaboratorError {
    match err {
        UtilsError::MissingColumn(c) => CollaboratorError::MissingColumn(c),
        UtilsError::Polars(e) => CollaboratorError::Polars(e),
        UtilsError::UnsupportedType { column, dtype } => {
            CollaboratorError::Parse { what: "column type", value: format!("{column}: {dtype}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tercile-io-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn return_columns_defaults() {
        let cols = ReturnColumns::default();
        assert_eq!(cols.entity, "TICKER");
        assert_eq!(cols.date, "date");
        assert_eq!(cols.value, "vwretd");
    }

    #[test]
    fn loads_fundamentals_frame() {
        let path = write_temp(
            "fundamentals.csv",
            "Ticker Symbol,Data Date,Current Assets - Total\n\
             AAA,2001-12-31,10.5\n\
             BBB,2001-12-31,\n",
        );
        let df = CsvLoader::new().load_panel(&path).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        assert!(df.column("Data Date").is_ok());
    }

    #[test]
    fn loads_returns_and_counts_skipped() {
        let path = write_temp(
            "returns.csv",
            "TICKER,date,vwretd\n\
             AAA,2015-01-02,0.01\n\
             AAA,20150105,-0.02\n\
             ,2015-01-02,0.03\n\
             BBB,garbage,0.01\n\
             BBB,2015-01-02,C\n",
        );
        let loaded = CsvLoader::new().load_returns(&path).unwrap();

        assert_eq!(loaded.observations.len(), 2);
        assert_eq!(loaded.skipped, 3);
        assert_eq!(loaded.observations[1].date, NaiveDate::from_ymd_opt(2015, 1, 5).unwrap());
        assert_eq!(loaded.observations[1].value, -0.02);
    }

    #[test]
    fn custom_return_columns() {
        let path = write_temp("crsp.csv", "permno,ticker,day,ret\n1,AAA,2015-01-02,0.5\n");
        let cols = ReturnColumns {
            entity: "ticker".to_string(),
            date: "day".to_string(),
            value: "ret".to_string(),
        };
        let loaded = CsvLoader::with_return_columns(cols).load_returns(&path).unwrap();
        assert_eq!(loaded.observations.len(), 1);
        assert_eq!(loaded.observations[0].entity.as_str(), "AAA");
    }

    #[test]
    fn missing_return_column() {
        let path = write_temp("no_value.csv", "TICKER,date\nAAA,2015-01-02\n");
        let err = CsvLoader::new().load_returns(&path).unwrap_err();
        assert!(matches!(err, CollaboratorError::MissingColumn(c) if c == "vwretd"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("tercile-io-does-not-exist.csv");
        assert!(CsvLoader::new().load_panel(&path).is_err());
    }
}
