//! Input collaborators.

use polars::prelude::DataFrame;
use tercile_primitives::{LoadedReturns, Universe};

use crate::CollaboratorError;

/// Reads raw fundamentals and security returns.
pub trait Loader: Send + Sync {
    /// Where the data lives (a path, a URL, an in-memory buffer).
    type Source: ?Sized;

    /// Load the raw fundamentals table.
    ///
    /// The frame is returned as read; column selection and row filtering belong to the
    /// panel cleaner.
    ///
    /// # Errors
    /// Returns `CollaboratorError` if the source cannot be read.
    fn load_panel(&self, source: &Self::Source) -> Result<DataFrame, CollaboratorError>;

    /// Load security returns.
    ///
    /// Records with a missing identifier, unparseable date or missing value are skipped
    /// and counted rather than failing the load.
    ///
    /// # Errors
    /// Returns `CollaboratorError` if the source cannot be read or lacks a required column.
    fn load_returns(&self, source: &Self::Source) -> Result<LoadedReturns, CollaboratorError>;
}

/// Supplies the set of admissible entities.
pub trait UniverseProvider: Send + Sync {
    /// Where the universe lives.
    type Source: ?Sized;

    /// Load the universe.
    ///
    /// # Errors
    /// Returns `CollaboratorError` if the source cannot be read.
    fn load_universe(&self, source: &Self::Source) -> Result<Universe, CollaboratorError>;
}
