//! Ranking reports.

use crate::summary::Summary;
use chrono::{DateTime, Utc};
use derive_more::Display;
use nashik_factors::{
    Edition, FactorExplanation, RankedEntity, ValuationConstants, factor_explanations,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stage at which a company dropped out of a run.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    /// Fundamentals could not be fetched
    #[display("fetch")]
    Fetch,
    /// Fundamentals could not be turned into metrics
    #[display("derivation")]
    Derivation,
    /// No factor could be scored for the company
    #[display("unranked")]
    Unranked,
}

/// Non-fatal, per-company problem reported alongside a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityWarning {
    /// Display name of the company
    pub entity: String,
    /// Where it failed
    pub kind: WarningKind,
    /// What went wrong
    pub message: String,
}

impl EntityWarning {
    /// Create a new warning.
    pub fn new(entity: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            kind,
            message: message.into(),
        }
    }
}

/// A ranked company with its summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    /// Ranked company
    pub entity: RankedEntity,
    /// Positives and cautions
    pub summary: Summary,
}

/// The full result of a ranking run.
#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Edition the ranking was computed with.
    pub edition: Edition,

    /// Valuation constants used.
    pub constants: ValuationConstants,

    /// Rows ordered by rank.
    pub rows: Vec<RankedRow>,

    /// Companies left out of the ranking.
    pub warnings: Vec<EntityWarning>,

    /// Factor explanation table for this edition.
    pub factors: Vec<FactorExplanation>,
}

impl RankingReport {
    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Row for a company, by display name.
    pub fn row(&self, name: &str) -> Option<&RankedRow> {
        self.rows.iter().find(|r| r.entity.metrics.name == name)
    }

    /// Plain-text rendering: ranking table, summaries and warnings.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nRanked Stock Analysis ({} edition)\n", self.edition));
        output.push_str(&format!(
            "Last updated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&"=".repeat(100));
        output.push('\n');

        output.push_str(&format!(
            "{:>4}  {:<24} {:>8} {:>6} {:>9} {:>9} {:>6} {:>6} {:>7} {:>4} {:>7}\n",
            "Rank",
            "Company",
            "P/E",
            "PEG",
            "ROE-CoE",
            "ROIC-WACC",
            "P/B",
            "D/E",
            "Yield%",
            "EQ",
            "Score"
        ));
        output.push_str(&"-".repeat(100));
        output.push('\n');

        for row in &self.rows {
            let m = &row.entity.metrics;
            output.push_str(&format!(
                "{:>4}  {:<24} {:>8} {:>6} {:>9} {:>9} {:>6} {:>6} {:>7} {:>4} {:>7.1}\n",
                row.entity.rank,
                m.name,
                cell(m.pe),
                cell(m.peg),
                cell(m.roe_coe_spread_pct),
                cell(m.roic_wacc_spread_pct),
                cell(m.price_to_book),
                cell(m.debt_to_equity),
                cell(m.dividend_yield_pct),
                m.earnings_quality.mark(),
                row.entity.total_score,
            ));
        }
        output.push_str(&"=".repeat(100));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "\n{} (Rank {})\n",
                row.summary.entity, row.summary.rank
            ));
            output.push_str("  Positives:\n");
            for statement in &row.summary.positives {
                output.push_str(&format!("    ✔ {statement}\n"));
            }
            if !row.summary.cautions.is_empty() {
                output.push_str("  Cautions:\n");
                for statement in &row.summary.cautions {
                    output.push_str(&format!("    ⚠ {statement}\n"));
                }
            }
        }

        if !self.warnings.is_empty() {
            output.push_str("\nSkipped:\n");
            for w in &self.warnings {
                output.push_str(&format!("  {} ({}): {}\n", w.entity, w.kind, w.message));
            }
        }

        output
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Plain-text rendering of a factor explanation table.
pub fn explanation_ascii_table(factors: &[FactorExplanation]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<38} {:<16} {}\n", "Factor", "Ideal", "Explanation"));
    output.push_str(&"-".repeat(100));
    output.push('\n');
    for f in factors {
        output.push_str(&format!("{:<38} {:<16} {}\n", f.factor, f.ideal, f.explanation));
    }
    output
}

/// Builder for ranking reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    edition: Option<Edition>,
    constants: Option<ValuationConstants>,
    rows: Vec<RankedRow>,
    warnings: Vec<EntityWarning>,
    generated_at: Option<DateTime<Utc>>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edition.
    pub const fn edition(mut self, edition: Edition) -> Self {
        self.edition = Some(edition);
        self
    }

    /// Set the valuation constants.
    pub const fn constants(mut self, constants: ValuationConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    /// Set the ranked rows.
    pub fn rows(mut self, rows: Vec<RankedRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Set the warnings.
    pub fn warnings(mut self, warnings: Vec<EntityWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Pin the generation timestamp instead of using the current time.
    pub const fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Build the report.
    pub fn build(self) -> RankingReport {
        let edition = self.edition.unwrap_or_default();
        RankingReport {
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            edition,
            constants: self.constants.unwrap_or_default(),
            rows: self.rows,
            warnings: self.warnings,
            factors: factor_explanations(&edition.factor_table()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryGenerator;
    use nashik_data::FundamentalsRecord;
    use nashik_factors::{MetricDeriver, RankScorer};

    fn sample_rows(edition: Edition) -> Vec<RankedRow> {
        let deriver = MetricDeriver::default();
        let records = [
            FundamentalsRecord {
                trailing_pe: Some(14.0),
                debt_to_equity: Some(0.2),
                dividend_yield: Some(0.02),
                ..FundamentalsRecord::new("India Glycols")
            },
            FundamentalsRecord {
                trailing_pe: Some(40.0),
                debt_to_equity: Some(1.6),
                ..FundamentalsRecord::new("DCX Systems")
            },
        ];
        let metrics: Vec<_> = records.iter().map(|r| deriver.derive(r).unwrap()).collect();
        let generator = SummaryGenerator::for_edition(edition);
        RankScorer::new(edition.factor_table())
            .score(&metrics)
            .into_iter()
            .map(|entity| RankedRow {
                summary: generator.summarize(&entity),
                entity,
            })
            .collect()
    }

    #[test]
    fn test_report_builder() {
        let report = ReportBuilder::new()
            .edition(Edition::Base)
            .rows(sample_rows(Edition::Base))
            .warnings(vec![EntityWarning::new(
                "Avantel",
                WarningKind::Fetch,
                "timeout",
            )])
            .build();

        assert_eq!(report.edition, Edition::Base);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.factors.len(), 7);
        assert_eq!(report.row("India Glycols").unwrap().entity.rank, 1);
        assert!(report.row("Avantel").is_none());
    }

    #[test]
    fn test_report_json() {
        let report = ReportBuilder::new()
            .rows(sample_rows(Edition::Extended))
            .build();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"edition\": \"extended\""));
        assert!(json.contains("\"India Glycols\""));
        assert!(json.contains("Low Debt-to-Equity"));
        assert!(json.contains("\"risk_free_rate\": 0.065"));
    }

    #[test]
    fn test_ascii_table() {
        let report = ReportBuilder::new()
            .rows(sample_rows(Edition::Extended))
            .warnings(vec![EntityWarning::new(
                "Jyoti Resins",
                WarningKind::Derivation,
                "non-finite value in beta",
            )])
            .build();
        let text = report.to_ascii_table();

        assert!(text.contains("India Glycols (Rank 1)"));
        assert!(text.contains("⚠ High Debt"));
        assert!(text.contains("Jyoti Resins (derivation): non-finite value in beta"));
    }

    #[test]
    fn test_explanation_table() {
        let text = explanation_ascii_table(&factor_explanations(&Edition::Base.factor_table()));
        assert!(text.contains("Lower PEG indicates undervaluation relative to growth."));
        assert!(!text.contains("ROIC"));
    }
}
