#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nashik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod universe;

// Re-export main types from sub-crates
pub use nashik_data as data;
pub use nashik_factors as factors;
pub use nashik_output as output;

pub use engine::{Engine, EngineConfig, RankingRun};
pub use error::{Result, RunError};
pub use universe::{Universe, nse::NseWatchlist};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
