//! Positives and cautions per ranked company.
//!
//! Rules run in a fixed order and that order is the order statements are
//! shown in. An unavailable metric never produces a positive.

use derive_more::Display;
use nashik_factors::{DerivedMetrics, EarningsQuality, Edition, RankedEntity};
use serde::{Serialize, Serializer};

/// A single summary statement.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statement {
    /// PEG below 1
    #[display("PEG < 1")]
    PegBelowOne,
    /// PEG at or above 1, or unavailable
    #[display("PEG ≥ 1 or unavailable")]
    PegHighOrUnavailable,
    /// ROE above cost of equity
    #[display("ROE exceeds Cost of Equity")]
    RoeExceedsCoe,
    /// ROE at or below cost of equity, or unavailable
    #[display("ROE ≤ CoE")]
    RoeBelowCoe,
    /// ROIC above WACC
    #[display("ROIC exceeds WACC")]
    RoicExceedsWacc,
    /// ROIC at or below WACC, or unavailable
    #[display("ROIC ≤ WACC")]
    RoicBelowWacc,
    /// D/E below 1
    #[display("Low Debt-to-Equity")]
    LowDebt,
    /// D/E at or above 1, or unavailable
    #[display("High Debt")]
    HighDebt,
    /// Dividend yield above 1%
    #[display("Healthy Dividend Yield")]
    HealthyDividendYield,
    /// Operating cash flow covers net income
    #[display("Strong Earnings Quality (CFO ≥ Net Profit)")]
    StrongEarningsQuality,
    /// Operating cash flow below net income
    #[display("Weak Earnings Quality (CFO < Net Profit)")]
    WeakEarningsQuality,
}

impl Statement {
    /// Whether this is a positive statement.
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            Self::PegBelowOne
                | Self::RoeExceedsCoe
                | Self::RoicExceedsWacc
                | Self::LowDebt
                | Self::HealthyDividendYield
                | Self::StrongEarningsQuality
        )
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One threshold check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryRule {
    /// PEG < 1
    Peg,
    /// ROE - CoE > 0
    RoeSpread,
    /// ROIC - WACC > 0
    RoicSpread,
    /// D/E < 1
    DebtToEquity,
    /// Dividend yield > 1%, positive only
    DividendYield,
    /// Earnings quality good or poor, silent when unknown
    EarningsQuality,
}

impl SummaryRule {
    /// Rules for an edition, in display order.
    pub fn for_edition(edition: Edition) -> Vec<Self> {
        let mut rules = vec![Self::Peg, Self::RoeSpread];
        if edition.is_extended() {
            rules.push(Self::RoicSpread);
        }
        rules.extend([Self::DebtToEquity, Self::DividendYield]);
        if edition.is_extended() {
            rules.push(Self::EarningsQuality);
        }
        rules
    }

    /// Statement this rule makes about the metrics, if any.
    pub fn evaluate(self, m: &DerivedMetrics) -> Option<Statement> {
        let below = |v: Option<f64>, limit: f64| v.is_some_and(|x| x < limit);
        let above = |v: Option<f64>, limit: f64| v.is_some_and(|x| x > limit);

        match self {
            Self::Peg if below(m.peg, 1.0) => Some(Statement::PegBelowOne),
            Self::Peg => Some(Statement::PegHighOrUnavailable),
            Self::RoeSpread if above(m.roe_coe_spread_pct, 0.0) => Some(Statement::RoeExceedsCoe),
            Self::RoeSpread => Some(Statement::RoeBelowCoe),
            Self::RoicSpread if above(m.roic_wacc_spread_pct, 0.0) => {
                Some(Statement::RoicExceedsWacc)
            }
            Self::RoicSpread => Some(Statement::RoicBelowWacc),
            Self::DebtToEquity if below(m.debt_to_equity, 1.0) => Some(Statement::LowDebt),
            Self::DebtToEquity => Some(Statement::HighDebt),
            Self::DividendYield if above(m.dividend_yield_pct, 1.0) => {
                Some(Statement::HealthyDividendYield)
            }
            Self::DividendYield => None,
            Self::EarningsQuality => match m.earnings_quality {
                EarningsQuality::Good => Some(Statement::StrongEarningsQuality),
                EarningsQuality::Poor => Some(Statement::WeakEarningsQuality),
                EarningsQuality::Unknown => None,
            },
        }
    }
}

/// Positives and cautions for one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Display name
    pub entity: String,
    /// Final rank
    pub rank: u32,
    /// Positive statements in rule order
    pub positives: Vec<Statement>,
    /// Cautions in rule order
    pub cautions: Vec<Statement>,
}

/// Builds summaries from a fixed rule list.
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    rules: Vec<SummaryRule>,
}

impl SummaryGenerator {
    /// Generator with the rules of an edition.
    pub fn for_edition(edition: Edition) -> Self {
        Self {
            rules: SummaryRule::for_edition(edition),
        }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[SummaryRule] {
        &self.rules
    }

    /// Summarize one ranked company.
    pub fn summarize(&self, entity: &RankedEntity) -> Summary {
        let (positives, cautions): (Vec<Statement>, Vec<Statement>) = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(&entity.metrics))
            .partition(|s| s.is_positive());

        Summary {
            entity: entity.metrics.name.clone(),
            rank: entity.rank,
            positives,
            cautions,
        }
    }
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::for_edition(Edition::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ranked(metrics: DerivedMetrics) -> RankedEntity {
        RankedEntity {
            metrics,
            factor_scores: Vec::new(),
            total_score: 0.0,
            rank: 1,
        }
    }

    fn empty_metrics() -> DerivedMetrics {
        DerivedMetrics {
            name: "Avantel".to_string(),
            symbol: None,
            pe: None,
            industry_pe: None,
            peg: None,
            price_to_book: None,
            debt_to_equity: None,
            roe_pct: None,
            coe_pct: 12.5,
            roe_coe_spread_pct: None,
            roic_pct: None,
            wacc_pct: None,
            roic_wacc_spread_pct: None,
            earnings_quality: EarningsQuality::Unknown,
            dividend_yield_pct: None,
            market_cap_cr: None,
            price: None,
        }
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            SummaryRule::for_edition(Edition::Base),
            vec![
                SummaryRule::Peg,
                SummaryRule::RoeSpread,
                SummaryRule::DebtToEquity,
                SummaryRule::DividendYield
            ]
        );
        assert_eq!(
            SummaryRule::for_edition(Edition::Extended),
            vec![
                SummaryRule::Peg,
                SummaryRule::RoeSpread,
                SummaryRule::RoicSpread,
                SummaryRule::DebtToEquity,
                SummaryRule::DividendYield,
                SummaryRule::EarningsQuality
            ]
        );
    }

    #[test]
    fn test_unavailable_falls_to_caution() {
        let summary = SummaryGenerator::for_edition(Edition::Extended)
            .summarize(&ranked(empty_metrics()));

        assert!(summary.positives.is_empty());
        assert_eq!(
            summary.cautions,
            vec![
                Statement::PegHighOrUnavailable,
                Statement::RoeBelowCoe,
                Statement::RoicBelowWacc,
                Statement::HighDebt
            ]
        );
    }

    #[test]
    fn test_all_positive_extended() {
        let mut m = empty_metrics();
        m.peg = Some(0.7);
        m.roe_coe_spread_pct = Some(3.0);
        m.roic_wacc_spread_pct = Some(1.5);
        m.debt_to_equity = Some(0.2);
        m.dividend_yield_pct = Some(2.5);
        m.earnings_quality = EarningsQuality::Good;

        let summary = SummaryGenerator::for_edition(Edition::Extended).summarize(&ranked(m));
        let text: Vec<String> = summary.positives.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "PEG < 1",
                "ROE exceeds Cost of Equity",
                "ROIC exceeds WACC",
                "Low Debt-to-Equity",
                "Healthy Dividend Yield",
                "Strong Earnings Quality (CFO ≥ Net Profit)"
            ]
        );
        assert!(summary.cautions.is_empty());
    }

    #[rstest]
    #[case(SummaryRule::Peg, 1.0, Statement::PegHighOrUnavailable)]
    #[case(SummaryRule::Peg, 0.99, Statement::PegBelowOne)]
    #[case(SummaryRule::RoeSpread, 0.0, Statement::RoeBelowCoe)]
    #[case(SummaryRule::RoeSpread, 0.01, Statement::RoeExceedsCoe)]
    #[case(SummaryRule::RoicSpread, 0.0, Statement::RoicBelowWacc)]
    #[case(SummaryRule::DebtToEquity, 1.0, Statement::HighDebt)]
    #[case(SummaryRule::DebtToEquity, 0.0, Statement::LowDebt)]
    #[case(SummaryRule::DividendYield, 1.01, Statement::HealthyDividendYield)]
    fn test_boundaries(#[case] rule: SummaryRule, #[case] value: f64, #[case] expected: Statement) {
        let mut m = empty_metrics();
        m.peg = Some(value);
        m.roe_coe_spread_pct = Some(value);
        m.roic_wacc_spread_pct = Some(value);
        m.debt_to_equity = Some(value);
        m.dividend_yield_pct = Some(value);
        assert_eq!(rule.evaluate(&m), Some(expected));
    }

    #[test]
    fn test_dividend_yield_has_no_caution() {
        let mut m = empty_metrics();
        m.dividend_yield_pct = Some(1.0);
        assert_eq!(SummaryRule::DividendYield.evaluate(&m), None);
        m.dividend_yield_pct = None;
        assert_eq!(SummaryRule::DividendYield.evaluate(&m), None);
    }

    #[test]
    fn test_poor_earnings_quality_is_caution() {
        let mut m = empty_metrics();
        m.earnings_quality = EarningsQuality::Poor;
        let statement = SummaryRule::EarningsQuality.evaluate(&m).unwrap();
        assert_eq!(statement, Statement::WeakEarningsQuality);
        assert!(!statement.is_positive());
    }

    #[test]
    fn test_statement_serializes_as_text() {
        let json = serde_json::to_string(&vec![Statement::LowDebt]).unwrap();
        assert_eq!(json, r#"["Low Debt-to-Equity"]"#);
    }
}
