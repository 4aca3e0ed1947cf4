//! Error types for ranking runs.

use nashik_data::DataError;
use nashik_output::EntityWarning;
use thiserror::Error;

/// Result type for ranking runs.
pub type Result<T> = std::result::Result<T, RunError>;

/// Errors that abort a ranking run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Nothing was left to rank
    #[error("no data available: {inputs} companies supplied, {} skipped", warnings.len())]
    NoDataAvailable {
        /// Companies handed to the run, fetched or not
        inputs: usize,
        /// Why each company dropped out
        warnings: Vec<EntityWarning>,
    },

    /// Engine configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot could not be read
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}
