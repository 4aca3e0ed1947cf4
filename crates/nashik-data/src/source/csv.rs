//! CSV snapshot files, one company per row.
//!
//! The header row names the record fields. Empty cells and missing columns
//! are absent values. A row that cannot be read as a record becomes a
//! [`FetchFailure`](crate::FetchFailure) instead of failing the file.

use super::{Entry, FundamentalsSource, NAME_KEYS, assemble};
use crate::error::Result;
use crate::record::FundamentalsRecord;
use crate::snapshot::{FetchFailure, FetchOutcome};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads a snapshot from CSV.
#[derive(Debug, Clone)]
pub struct CsvSnapshotSource {
    path: PathBuf,
}

impl CsvSnapshotSource {
    /// Read from a file on each fetch.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse CSV from any reader.
    ///
    /// # Errors
    ///
    /// Fails when the input cannot be read or two rows share a name.
    pub fn parse<R: Read>(reader: R) -> Result<FetchOutcome> {
        let mut rdr = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let name_column = headers.iter().position(|h| NAME_KEYS.contains(&h));

        let mut entries: Vec<Entry> = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            let row = row?;
            let name = name_column
                .and_then(|c| row.get(c))
                .filter(|name| !name.is_empty())
                .map_or_else(|| format!("row {}", i + 1), str::to_string);
            entries.push(
                row.deserialize::<FundamentalsRecord>(Some(&headers))
                    .map_err(|e| FetchFailure::new(name, e.to_string())),
            );
        }

        let outcome = assemble(entries)?;
        tracing::debug!(
            records = outcome.snapshot.len(),
            failures = outcome.failures.len(),
            "parsed CSV snapshot"
        );
        Ok(outcome)
    }
}

impl FundamentalsSource for CsvSnapshotSource {
    fn fetch(&self) -> Result<FetchOutcome> {
        let file = std::fs::File::open(&self.path)?;
        Self::parse(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataError;

    #[test]
    fn test_parse_with_empty_cells() {
        let data = "\
name,symbol,trailing_pe,beta,dividend_yield
KNR Constructions,KNRCON.NS,11.2,,0.001
Avantel,AVANTEL.NS,,1.4,
";
        let outcome = CsvSnapshotSource::parse(data.as_bytes()).unwrap();
        let snapshot = &outcome.snapshot;
        assert_eq!(snapshot.len(), 2);
        assert!(outcome.failures.is_empty());

        let knr = snapshot.get("KNR Constructions").unwrap();
        assert_eq!(knr.symbol.as_deref(), Some("KNRCON.NS"));
        assert_eq!(knr.trailing_pe, Some(11.2));
        assert_eq!(knr.beta, None);
        assert_eq!(knr.total_debt, None);

        let avantel = snapshot.get("Avantel").unwrap();
        assert_eq!(avantel.trailing_pe, None);
        assert_eq!(avantel.beta, Some(1.4));
        assert_eq!(avantel.dividend_yield, None);
    }

    #[test]
    fn test_duplicate_rows() {
        let data = "name,beta\nAvantel,1.0\nAvantel,1.1\n";
        let result = CsvSnapshotSource::parse(data.as_bytes());
        assert!(matches!(result, Err(DataError::DuplicateEntity(_))));
    }

    #[test]
    fn test_unparseable_number_rejects_only_that_row() {
        let data = "name,beta\nAvantel,high\nDCX Systems,0.8\n,oops\n";
        let outcome = CsvSnapshotSource::parse(data.as_bytes()).unwrap();

        assert_eq!(outcome.snapshot.names(), vec!["DCX Systems"]);
        let names: Vec<&str> = outcome.failures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Avantel", "row 3"]);
    }

    #[test]
    fn test_short_row_is_read_with_missing_values() {
        let data = "name,beta,trailing_pe\nVesuvius India,0.7\n";
        let outcome = CsvSnapshotSource::parse(data.as_bytes()).unwrap();

        let vesuvius = outcome.snapshot.get("Vesuvius India").unwrap();
        assert_eq!(vesuvius.beta, Some(0.7));
        assert_eq!(vesuvius.trailing_pe, None);
    }
}
