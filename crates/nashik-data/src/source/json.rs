//! JSON snapshot files.
//!
//! Two layouts are accepted: a bare array of records, or an object with an
//! `entities` array and an optional `failures` array of `{name, reason}`.

use super::{Entry, FundamentalsSource, NAME_KEYS, assemble};
use crate::error::{DataError, Result};
use crate::record::FundamentalsRecord;
use crate::snapshot::{FetchFailure, FetchOutcome};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Where the JSON comes from.
#[derive(Debug, Clone)]
enum JsonInput {
    File(PathBuf),
    Text(String),
}

/// Reads a snapshot from JSON.
///
/// Records are deserialized one at a time. A record that does not fit
/// becomes a [`FetchFailure`] named after it, or after its position when no
/// name can be read.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    input: JsonInput,
}

impl JsonSnapshotSource {
    /// Read from a file on each fetch.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: JsonInput::File(path.as_ref().to_path_buf()),
        }
    }

    /// Parse the given JSON text on each fetch.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Text(text.into()),
        }
    }

    /// Parse a snapshot document.
    ///
    /// # Errors
    ///
    /// Fails when the text is not JSON, the layout is neither accepted form,
    /// or two entries share a name.
    pub fn parse(text: &str) -> Result<FetchOutcome> {
        let (entities, listed_failures) = match serde_json::from_str(text)? {
            Value::Array(entities) => (entities, Vec::new()),
            Value::Object(mut document) => {
                let Some(Value::Array(entities)) = document.remove("entities") else {
                    return Err(DataError::InvalidSnapshot(
                        "expected an `entities` array".to_string(),
                    ));
                };
                let failures: Vec<FetchFailure> = match document.remove("failures") {
                    Some(failures) => serde_json::from_value(failures)?,
                    None => Vec::new(),
                };
                (entities, failures)
            }
            _ => {
                return Err(DataError::InvalidSnapshot(
                    "expected an array of records or an object with `entities`".to_string(),
                ));
            }
        };

        let entries: Vec<Entry> = entities
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let name = record_name(&value).unwrap_or_else(|| format!("record {}", i + 1));
                serde_json::from_value::<FundamentalsRecord>(value)
                    .map_err(|e| FetchFailure::new(name, e.to_string()))
            })
            .collect();

        let mut outcome = assemble(entries)?;
        for failure in listed_failures {
            outcome.push_failure(failure)?;
        }

        tracing::debug!(
            records = outcome.snapshot.len(),
            failures = outcome.failures.len(),
            "parsed JSON snapshot"
        );
        Ok(outcome)
    }
}

fn record_name(value: &Value) -> Option<String> {
    NAME_KEYS
        .iter()
        .find_map(|key| value.get(key)?.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

impl FundamentalsSource for JsonSnapshotSource {
    fn fetch(&self) -> Result<FetchOutcome> {
        match &self.input {
            JsonInput::File(path) => Self::parse(&std::fs::read_to_string(path)?),
            JsonInput::Text(text) => Self::parse(text),
        }
    }
}
