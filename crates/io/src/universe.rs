//! Ticker universe from a CSV column.

use std::path::Path;

use tercile_primitives::Universe;
use tercile_traits::{CollaboratorError, UniverseProvider};

/// Reads the admissible tickers from one column of a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvUniverseProvider {
    column: String,
}

impl Default for CsvUniverseProvider {
    fn default() -> Self {
        Self::new("Tickers")
    }
}

impl CsvUniverseProvider {
    /// Create a provider reading `column`.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self { column: column.into() }
    }

    /// Get the column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl UniverseProvider for CsvUniverseProvider {
    type Source = Path;

    /// Blank cells are ignored and surrounding whitespace is trimmed.
    fn load_universe(&self, source: &Path) -> Result<Universe, CollaboratorError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(source)?;
        let idx = reader
            .headers()?
            .iter()
            .position(|h| h.trim() == self.column)
            .ok_or_else(|| CollaboratorError::MissingColumn(self.column.clone()))?;

        let mut universe = Universe::new();
        for record in reader.records() {
            let record = record?;
            if let Some(ticker) = record.get(idx).map(str::trim).filter(|t| !t.is_empty()) {
                universe.insert(ticker);
            }
        }

        tracing::info!(path = %source.display(), tickers = universe.len(), "loaded universe");
        Ok(universe)
    }
}
