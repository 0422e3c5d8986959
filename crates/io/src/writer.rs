//! File exports of pipeline results.

use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tercile_primitives::{
    Date, PerformanceMetrics, RankedPanel, RegressionResult, ReturnSeries,
};
use tercile_traits::{CollaboratorError, Writer};

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Compact JSON.
    Json,
    /// Pretty-printed JSON.
    PrettyJson,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Writes each result set to its own file inside a destination directory.
///
/// Files are named `ranked_panel`, `metrics`, `regressions` and, for series, after the
/// name passed to [`Writer::write_series`], with the extension of the export format.
/// The directory is created if needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter {
    format: ExportFormat,
}

impl FileWriter {
    /// Create a writer for `format`.
    #[must_use]
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Get the export format.
    #[must_use]
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// Path a result set called `name` is written to.
    #[must_use]
    pub fn path_for(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.{}", self.format.extension()))
    }

    /// Write any serializable value as JSON, regardless of the configured format.
    ///
    /// Used for nested reports that have no tabular form.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created or serialization
    /// fails.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        dir: &Path,
    ) -> Result<PathBuf, CollaboratorError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{name}.json"));
        let mut out = BufWriter::new(File::create(&path)?);
        if self.format == ExportFormat::Json {
            serde_json::to_writer(&mut out, value)?;
        } else {
            serde_json::to_writer_pretty(&mut out, value)?;
        }
        out.flush()?;
        tracing::info!(path = %path.display(), "wrote report");
        Ok(path)
    }

    fn write_records<T: Serialize>(
        &self,
        name: &str,
        records: &[T],
        dir: &Path,
    ) -> Result<(), CollaboratorError> {
        fs::create_dir_all(dir)?;
        let path = self.path_for(dir, name);
        match self.format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(&path)?;
                for record in records {
                    wtr.serialize(record)?;
                }
                wtr.flush()?;
            }
            ExportFormat::Json => {
                let mut out = BufWriter::new(File::create(&path)?);
                serde_json::to_writer(&mut out, records)?;
                out.flush()?;
            }
            ExportFormat::PrettyJson => {
                let mut out = BufWriter::new(File::create(&path)?);
                serde_json::to_writer_pretty(&mut out, records)?;
                out.flush()?;
            }
        }
        tracing::info!(path = %path.display(), rows = records.len(), "wrote {name}");
        Ok(())
    }
}

impl Writer for FileWriter {
    type Destination = Path;

    fn write_panel(&self, panel: &RankedPanel, dir: &Path) -> Result<(), CollaboratorError> {
        self.write_records("ranked_panel", panel.ranks(), dir)
    }

    fn write_metrics(
        &self,
        metrics: &[PerformanceMetrics],
        dir: &Path,
    ) -> Result<(), CollaboratorError> {
        self.write_records("metrics", metrics, dir)
    }

    fn write_regression(
        &self,
        results: &[RegressionResult],
        dir: &Path,
    ) -> Result<(), CollaboratorError> {
        self.write_records("regressions", results, dir)
    }

    /// CSV output is wide: one `date` column followed by one column per series, with
    /// empty cells where a series has no value. JSON output keeps each series whole.
    fn write_series(
        &self,
        name: &str,
        series: &[ReturnSeries],
        dir: &Path,
    ) -> Result<(), CollaboratorError> {
        if self.format != ExportFormat::Csv {
            return self.write_records(name, series, dir);
        }

        fs::create_dir_all(dir)?;
        let path = self.path_for(dir, name);
        let mut wtr = csv::Writer::from_path(&path)?;

        let mut header = vec!["date".to_string()];
        header.extend(series.iter().map(|s| s.label.to_string()));
        wtr.write_record(&header)?;

        let dates: BTreeSet<Date> = series.iter().flat_map(|s| s.dates().iter().copied()).collect();
        for date in &dates {
            let mut row = vec![date.to_string()];
            row.extend(
                series.iter().map(|s| s.get(*date).map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&row)?;
        }
        wtr.flush()?;

        tracing::info!(path = %path.display(), rows = dates.len(), "wrote {name}");
        Ok(())
    }
}
