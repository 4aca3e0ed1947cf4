//! Error types for metric derivation and scoring.

use thiserror::Error;

/// Result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorsError>;

/// Errors raised by the deriver and scorer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FactorsError {
    /// A record could not be turned into metrics at all
    #[error("Derivation failed for {entity}: {reason}")]
    Derivation {
        /// Display name of the company
        entity: String,
        /// What was wrong with the record
        reason: String,
    },

    /// Valuation constants are unusable
    #[error("Invalid valuation constants: {0}")]
    InvalidConstants(String),
}

impl FactorsError {
    pub(crate) fn derivation(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Derivation {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}
