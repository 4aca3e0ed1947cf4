//! Per-run fundamentals snapshot and fetch outcome.

use crate::error::{DataError, Result};
use crate::record::FundamentalsRecord;
use serde::{Deserialize, Serialize};

/// Insertion-ordered collection of records with unique names.
///
/// A snapshot is supplied once per scoring run. The engine keeps the
/// insertion order as the tie-break order of the final ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FundamentalsSnapshot {
    records: Vec<FundamentalsRecord>,
}

impl FundamentalsSnapshot {
    /// Create an empty snapshot.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Build a snapshot, rejecting duplicate names.
    pub fn from_records(records: impl IntoIterator<Item = FundamentalsRecord>) -> Result<Self> {
        let mut snapshot = Self::new();
        for record in records {
            snapshot.push(record)?;
        }
        Ok(snapshot)
    }

    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DuplicateEntity`] if a record with the same name is present.
    pub fn push(&mut self, record: FundamentalsRecord) -> Result<()> {
        if self.contains(&record.name) {
            return Err(DataError::DuplicateEntity(record.name));
        }
        self.records.push(record);
        Ok(())
    }

    /// Whether a record with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name == name)
    }

    /// Look up a record by display name.
    pub fn get(&self, name: &str) -> Option<&FundamentalsRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[FundamentalsRecord] {
        &self.records
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, FundamentalsRecord> {
        self.records.iter()
    }

    /// Display names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Number of records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a FundamentalsSnapshot {
    type Item = &'a FundamentalsRecord;
    type IntoIter = std::slice::Iter<'a, FundamentalsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A company whose fundamentals could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    /// Display name of the company
    pub name: String,
    /// Why the fetch failed
    pub reason: String,
}

impl FetchFailure {
    /// Create a new fetch failure.
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// What the fetch side hands to the engine for one run.
///
/// Failed companies are listed separately and never appear in the snapshot
/// as half-populated records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Companies that were fetched
    pub snapshot: FundamentalsSnapshot,
    /// Companies that could not be fetched
    pub failures: Vec<FetchFailure>,
}

impl FetchOutcome {
    /// Outcome with no failures.
    pub fn complete(snapshot: FundamentalsSnapshot) -> Self {
        Self {
            snapshot,
            failures: Vec::new(),
        }
    }

    /// Record a failed company.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidSnapshot`] if the company is also present in the snapshot.
    pub fn push_failure(&mut self, failure: FetchFailure) -> Result<()> {
        if self.snapshot.contains(&failure.name) {
            return Err(DataError::InvalidSnapshot(format!(
                "{} is listed both as fetched and as failed",
                failure.name
            )));
        }
        self.failures.push(failure);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_kept() {
        let snapshot = FundamentalsSnapshot::from_records([
            FundamentalsRecord::new("Vesuvius India"),
            FundamentalsRecord::new("Avantel"),
            FundamentalsRecord::new("DCX Systems"),
        ])
        .unwrap();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(
            snapshot.names(),
            vec!["Vesuvius India", "Avantel", "DCX Systems"]
        );
        assert!(snapshot.get("Avantel").is_some());
        assert!(snapshot.get("Unknown").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = FundamentalsSnapshot::from_records([
            FundamentalsRecord::new("Avantel"),
            FundamentalsRecord::new("Avantel"),
        ]);
        assert!(matches!(result, Err(DataError::DuplicateEntity(name)) if name == "Avantel"));
    }

    #[test]
    fn test_failure_cannot_shadow_fetched_record() {
        let snapshot =
            FundamentalsSnapshot::from_records([FundamentalsRecord::new("Avantel")]).unwrap();
        let mut outcome = FetchOutcome::complete(snapshot);

        assert!(
            outcome
                .push_failure(FetchFailure::new("Gujarat Pipavav", "timeout"))
                .is_ok()
        );
        assert!(matches!(
            outcome.push_failure(FetchFailure::new("Avantel", "timeout")),
            Err(DataError::InvalidSnapshot(_))
        ));
        assert_eq!(outcome.failures.len(), 1);
    }
}
