#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nashik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod deriver;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod scorer;

pub use constants::ValuationConstants;
pub use deriver::MetricDeriver;
pub use error::{FactorsError, Result};
pub use metrics::{DerivedMetrics, EarningsQuality};

// Re-export registry types for convenience
pub use registry::{
    Direction, Edition, FactorExplanation, FactorKind, FactorSpec, FactorTable, ScoringMode,
    factor_explanations,
};
pub use scorer::{FactorScore, RankScorer, RankedEntity, competition_ranks};
