//! Ranking runs.
//!
//! A run derives metrics for every fetched company, ranks the survivors and
//! summarizes each ranked company. Per-company failures become warnings; the
//! run only fails when nothing is left to rank.

use crate::error::{Result, RunError};
use nashik_data::{FetchOutcome, FundamentalsSource};
use nashik_factors::{DerivedMetrics, Edition, MetricDeriver, RankScorer, ValuationConstants};
use nashik_output::{
    EntityWarning, RankedRow, RankingReport, ReportBuilder, SummaryGenerator, WarningKind,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Valuation assumptions
    pub constants: ValuationConstants,
    /// Factor table and summary rules to use
    pub edition: Edition,
}

impl EngineConfig {
    /// Parse a JSON config; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] if the text is not a valid config.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RunError::Config(e.to_string()))
    }

    /// Load a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RunError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Check the valuation constants.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] describing the first invalid constant.
    pub fn validate(&self) -> Result<()> {
        self.constants
            .validate()
            .map_err(|e| RunError::Config(e.to_string()))
    }
}

/// Output of a successful run, ordered by rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRun {
    /// Ranked companies with their summaries
    pub rows: Vec<RankedRow>,
    /// Companies that were left out
    pub warnings: Vec<EntityWarning>,
    /// Configuration the run used
    pub config: EngineConfig,
}

impl RankingRun {
    /// Wrap the run in a timestamped report.
    pub fn into_report(self) -> RankingReport {
        ReportBuilder::new()
            .edition(self.config.edition)
            .constants(self.config.constants)
            .rows(self.rows)
            .warnings(self.warnings)
            .build()
    }
}

/// Derives, ranks and summarizes a snapshot.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    deriver: MetricDeriver,
    scorer: RankScorer,
    summaries: SummaryGenerator,
}

impl Engine {
    /// Create an engine.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] if the configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            deriver: MetricDeriver::with_constants(config.constants),
            scorer: RankScorer::new(config.edition.factor_table()),
            summaries: SummaryGenerator::for_edition(config.edition),
        })
    }

    /// The configuration in use.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch from a source and run.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Data`] if the source fails as a whole, or
    /// [`RunError::NoDataAvailable`] if nothing could be ranked.
    pub fn run_source(&self, source: &dyn FundamentalsSource) -> Result<RankingRun> {
        let outcome = source.fetch()?;
        self.run(&outcome)
    }

    /// Run over an already fetched snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NoDataAvailable`] if nothing could be ranked.
    pub fn run(&self, outcome: &FetchOutcome) -> Result<RankingRun> {
        let inputs = outcome.snapshot.len() + outcome.failures.len();
        let mut warnings: Vec<EntityWarning> = outcome
            .failures
            .iter()
            .map(|f| {
                tracing::warn!(entity = %f.name, reason = %f.reason, "fetch failed, skipping");
                EntityWarning::new(&f.name, WarningKind::Fetch, &f.reason)
            })
            .collect();

        let derived: Vec<_> = outcome
            .snapshot
            .records()
            .par_iter()
            .map(|record| self.deriver.derive(record).map_err(|e| (record.name.clone(), e)))
            .collect();

        let mut metrics: Vec<DerivedMetrics> = Vec::with_capacity(derived.len());
        for result in derived {
            match result {
                Ok(m) => metrics.push(m),
                Err((entity, e)) => {
                    tracing::warn!(entity = %entity, error = %e, "derivation failed, skipping");
                    warnings.push(EntityWarning::new(
                        entity,
                        WarningKind::Derivation,
                        e.to_string(),
                    ));
                }
            }
        }

        let ranked = self.scorer.score(&metrics);

        let ranked_names: HashSet<&str> = ranked.iter().map(|r| r.name()).collect();
        for m in metrics.iter().filter(|m| !ranked_names.contains(m.name.as_str())) {
            tracing::warn!(entity = %m.name, "no factor could be scored, skipping");
            warnings.push(EntityWarning::new(
                &m.name,
                WarningKind::Unranked,
                "every ranked metric is unavailable",
            ));
        }

        if ranked.is_empty() {
            return Err(RunError::NoDataAvailable { inputs, warnings });
        }

        let rows: Vec<RankedRow> = ranked
            .into_par_iter()
            .map(|entity| RankedRow {
                summary: self.summaries.summarize(&entity),
                entity,
            })
            .collect();

        tracing::info!(
            edition = %self.config.edition,
            inputs,
            ranked = rows.len(),
            skipped = warnings.len(),
            "ranking complete"
        );

        Ok(RankingRun {
            rows,
            warnings,
            config: self.config,
        })
    }
}
