//! Fundamentals sources.
//!
//! A source stands in for the market-data collaborator: it owns retrieval,
//! retries and freshness, and hands the engine a finished [`FetchOutcome`].
//! The engine never knows how old the data is.

pub mod csv;
pub mod json;

pub use self::csv::CsvSnapshotSource;
pub use self::json::JsonSnapshotSource;

use crate::error::{DataError, Result};
use crate::record::FundamentalsRecord;
use crate::snapshot::{FetchFailure, FetchOutcome};

/// Keys a record's display name may appear under.
pub(crate) const NAME_KEYS: [&str; 3] = ["name", "company", "Company"];

/// One parsed snapshot entry: a usable record, or why it was rejected.
pub(crate) type Entry = std::result::Result<FundamentalsRecord, FetchFailure>;

/// Build an outcome from parsed entries, rejected ones becoming failures.
///
/// Names must be unique across records and rejections.
pub(crate) fn assemble(entries: Vec<Entry>) -> Result<FetchOutcome> {
    let mut outcome = FetchOutcome::default();
    let mut rejected = Vec::new();
    for entry in entries {
        match entry {
            Ok(record) => outcome.snapshot.push(record)?,
            Err(failure) => rejected.push(failure),
        }
    }

    for failure in rejected {
        let taken = outcome.snapshot.contains(&failure.name)
            || outcome.failures.iter().any(|f| f.name == failure.name);
        if taken {
            return Err(DataError::DuplicateEntity(failure.name));
        }
        tracing::debug!(
            entity = %failure.name,
            reason = %failure.reason,
            "rejected malformed record"
        );
        outcome.failures.push(failure);
    }
    Ok(outcome)
}

/// Boundary implemented by anything that can produce a fundamentals snapshot.
pub trait FundamentalsSource {
    /// Produce the snapshot for one run.
    ///
    /// # Errors
    ///
    /// Returns an error only when no snapshot can be produced at all.
    /// Per-company problems belong in [`FetchOutcome::failures`].
    fn fetch(&self) -> Result<FetchOutcome>;
}

/// Source over an already materialized outcome.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    outcome: FetchOutcome,
}

impl StaticSource {
    /// Wrap an outcome.
    pub const fn new(outcome: FetchOutcome) -> Self {
        Self { outcome }
    }
}

impl FundamentalsSource for StaticSource {
    fn fetch(&self) -> Result<FetchOutcome> {
        Ok(self.outcome.clone())
    }
}
