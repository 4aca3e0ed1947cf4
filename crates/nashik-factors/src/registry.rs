//! Factor Registry
//!
//! The factor table decides which derived metrics take part in the ranking and
//! how each one is turned into a score. Editions are predefined tables.

use crate::metrics::DerivedMetrics;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Derived metrics that can be scored.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// PEG ratio
    #[display("PEG")]
    Peg,
    /// Trailing P/E
    #[display("P/E")]
    PriceToEarnings,
    /// Price to book
    #[display("P/B")]
    PriceToBook,
    /// Debt to equity
    #[display("D/E")]
    DebtToEquity,
    /// ROE minus cost of equity
    #[display("ROE - CoE (%)")]
    RoeCoeSpread,
    /// ROIC minus WACC
    #[display("ROIC - WACC (%)")]
    RoicWaccSpread,
    /// Dividend yield
    #[display("Dividend Yield (%)")]
    DividendYield,
    /// Earnings quality 0/1 score
    #[display("Earnings Quality")]
    EarningsQuality,
}

impl FactorKind {
    /// Stable snake_case identifier.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Peg => "peg",
            Self::PriceToEarnings => "pe",
            Self::PriceToBook => "pb",
            Self::DebtToEquity => "de",
            Self::RoeCoeSpread => "roe_coe_spread",
            Self::RoicWaccSpread => "roic_wacc_spread",
            Self::DividendYield => "dividend_yield",
            Self::EarningsQuality => "earnings_quality",
        }
    }

    /// The metric value this factor reads.
    pub const fn value_of(self, metrics: &DerivedMetrics) -> Option<f64> {
        match self {
            Self::Peg => metrics.peg,
            Self::PriceToEarnings => metrics.pe,
            Self::PriceToBook => metrics.price_to_book,
            Self::DebtToEquity => metrics.debt_to_equity,
            Self::RoeCoeSpread => metrics.roe_coe_spread_pct,
            Self::RoicWaccSpread => metrics.roic_wacc_spread_pct,
            Self::DividendYield => metrics.dividend_yield_pct,
            Self::EarningsQuality => metrics.earnings_quality_score(),
        }
    }
}

/// Sort direction for competition ranking.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lower is better, smallest value gets rank 1
    #[display("ascending")]
    Ascending,
    /// Higher is better, largest value gets rank 1
    #[display("descending")]
    Descending,
}

impl Direction {
    /// Order `a` before `b` when `a` is better.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

/// How a factor's metric becomes a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Competition rank across the universe in the given direction
    CompetitionRank(Direction),
    /// The metric value itself is added to the total, unranked
    Scalar,
}

/// One row of a factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorSpec {
    /// Metric being scored
    pub kind: FactorKind,
    /// Scoring mode
    pub mode: ScoringMode,
}

impl FactorSpec {
    /// Ranked factor.
    pub const fn ranked(kind: FactorKind, direction: Direction) -> Self {
        Self {
            kind,
            mode: ScoringMode::CompetitionRank(direction),
        }
    }

    /// Scalar factor.
    pub const fn scalar(kind: FactorKind) -> Self {
        Self {
            kind,
            mode: ScoringMode::Scalar,
        }
    }
}

/// Which metric set a run scores and reports on.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// Valuation, ROE spread, leverage and yield
    #[display("base")]
    Base,
    /// Base plus ROIC - WACC spread and earnings quality
    #[default]
    #[display("extended")]
    Extended,
}

impl Edition {
    /// Factor table for this edition.
    pub fn factor_table(self) -> FactorTable {
        match self {
            Self::Base => FactorTable::base(),
            Self::Extended => FactorTable::extended(),
        }
    }

    /// Whether ROIC, WACC and earnings quality are scored and reported.
    pub const fn is_extended(self) -> bool {
        matches!(self, Self::Extended)
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" | "v1" => Ok(Self::Base),
            "extended" | "v2" => Ok(Self::Extended),
            other => Err(format!("unknown edition '{other}', expected base or extended")),
        }
    }
}

/// Ordered list of scored factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorTable {
    specs: Vec<FactorSpec>,
}

impl FactorTable {
    /// Build a table from explicit rows.
    pub const fn new(specs: Vec<FactorSpec>) -> Self {
        Self { specs }
    }

    /// PEG, P/E, P/B, D/E ascending; ROE - CoE and dividend yield descending.
    pub fn base() -> Self {
        use Direction::{Ascending, Descending};
        Self::new(vec![
            FactorSpec::ranked(FactorKind::Peg, Ascending),
            FactorSpec::ranked(FactorKind::PriceToEarnings, Ascending),
            FactorSpec::ranked(FactorKind::PriceToBook, Ascending),
            FactorSpec::ranked(FactorKind::DebtToEquity, Ascending),
            FactorSpec::ranked(FactorKind::RoeCoeSpread, Descending),
            FactorSpec::ranked(FactorKind::DividendYield, Descending),
        ])
    }

    /// Base factors plus ROIC - WACC (descending) and the raw earnings-quality score.
    pub fn extended() -> Self {
        use Direction::{Ascending, Descending};
        Self::new(vec![
            FactorSpec::ranked(FactorKind::Peg, Ascending),
            FactorSpec::ranked(FactorKind::PriceToEarnings, Ascending),
            FactorSpec::ranked(FactorKind::PriceToBook, Ascending),
            FactorSpec::ranked(FactorKind::DebtToEquity, Ascending),
            FactorSpec::ranked(FactorKind::RoeCoeSpread, Descending),
            FactorSpec::ranked(FactorKind::RoicWaccSpread, Descending),
            FactorSpec::ranked(FactorKind::DividendYield, Descending),
            FactorSpec::scalar(FactorKind::EarningsQuality),
        ])
    }

    /// Rows in scoring order.
    pub fn specs(&self) -> &[FactorSpec] {
        &self.specs
    }

    /// Whether the table scores this factor.
    pub fn contains(&self, kind: FactorKind) -> bool {
        self.specs.iter().any(|s| s.kind == kind)
    }

    /// Scoring mode of a factor, if scored.
    pub fn mode_of(&self, kind: FactorKind) -> Option<ScoringMode> {
        self.specs.iter().find(|s| s.kind == kind).map(|s| s.mode)
    }

    /// Number of scored factors.
    pub const fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no factor is scored.
    pub const fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        Edition::default().factor_table()
    }
}

/// Reference row explaining a factor to readers of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorExplanation {
    /// Column label
    pub factor: &'static str,
    /// Ideal condition
    pub ideal: &'static str,
    /// Why it matters
    pub explanation: &'static str,
    /// Scored factor this row describes, `None` for display-only columns
    #[serde(skip)]
    pub kind: Option<FactorKind>,
}

const EXPLANATIONS: &[FactorExplanation] = &[
    FactorExplanation {
        factor: "PEG",
        ideal: "< 1",
        explanation: "Lower PEG indicates undervaluation relative to growth.",
        kind: Some(FactorKind::Peg),
    },
    FactorExplanation {
        factor: "P/E",
        ideal: "Low vs industry",
        explanation: "Lower P/E suggests better value.",
        kind: Some(FactorKind::PriceToEarnings),
    },
    FactorExplanation {
        factor: "Industry P/E",
        ideal: "—",
        explanation: "For comparison with company P/E.",
        kind: None,
    },
    FactorExplanation {
        factor: "P/B",
        ideal: "Low",
        explanation: "Lower P/B indicates potential undervaluation.",
        kind: Some(FactorKind::PriceToBook),
    },
    FactorExplanation {
        factor: "D/E",
        ideal: "< 1",
        explanation: "Lower D/E means lower financial risk.",
        kind: Some(FactorKind::DebtToEquity),
    },
    FactorExplanation {
        factor: "ROE - CoE (%)",
        ideal: "> 0",
        explanation: "ROE above CoE indicates value creation.",
        kind: Some(FactorKind::RoeCoeSpread),
    },
    FactorExplanation {
        factor: "ROIC - WACC (%)",
        ideal: "> 0",
        explanation: "ROIC above WACC means invested capital earns more than it costs.",
        kind: Some(FactorKind::RoicWaccSpread),
    },
    FactorExplanation {
        factor: "Dividend Yield (%)",
        ideal: "> 1%",
        explanation: "Higher yield is attractive for income investors.",
        kind: Some(FactorKind::DividendYield),
    },
    FactorExplanation {
        factor: "Earnings Quality (CFO ≥ Net Profit)",
        ideal: "✔",
        explanation: "Good earnings quality when operating cash ≥ reported net income. \
                      Scoring: 1 if true, 0 otherwise.",
        kind: Some(FactorKind::EarningsQuality),
    },
];

/// Explanation rows relevant to a factor table, in display order.
pub fn factor_explanations(table: &FactorTable) -> Vec<FactorExplanation> {
    EXPLANATIONS
        .iter()
        .filter(|e| e.kind.is_none_or(|k| table.contains(k)))
        .copied()
        .collect()
}
