//! Multi-factor rank scoring.
//!
//! Ranks are relative to the collection, so scoring always runs over the whole
//! universe at once. Lower totals are better.

use crate::metrics::DerivedMetrics;
use crate::registry::{Direction, FactorKind, FactorSpec, FactorTable, ScoringMode};
use serde::{Deserialize, Serialize};

/// Score one factor contributed to an entity's total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Factor scored
    pub factor: FactorKind,
    /// Rank or scalar, `None` when the metric was unavailable
    pub score: Option<f64>,
}

/// A company with its factor scores, total and final rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    /// Metrics the ranking was computed from
    pub metrics: DerivedMetrics,
    /// Per-factor scores in factor-table order
    pub factor_scores: Vec<FactorScore>,
    /// Sum of available factor scores
    pub total_score: f64,
    /// Competition rank of the total, 1 is best
    pub rank: u32,
}

impl RankedEntity {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.metrics.name
    }

    /// Score contributed by one factor.
    pub fn score_for(&self, factor: FactorKind) -> Option<f64> {
        self.factor_scores
            .iter()
            .find(|s| s.factor == factor)
            .and_then(|s| s.score)
    }
}

/// Competition ranks (ties share the lowest 1-based position).
///
/// `None` inputs are skipped and get `None`.
pub fn competition_ranks(values: &[Option<f64>], direction: Direction) -> Vec<Option<u32>> {
    let sorted = sorted_by(values.iter().flatten().copied().collect(), direction);
    values
        .iter()
        .map(|value| value.map(|v| position_of(&sorted, v, direction)))
        .collect()
}

fn sorted_by(mut values: Vec<f64>, direction: Direction) -> Vec<f64> {
    values.sort_by(|a, b| direction.compare(*a, *b));
    values
}

/// 1 + number of values strictly better than `v`; `sorted` must be ordered by `direction`.
fn position_of(sorted: &[f64], v: f64, direction: Direction) -> u32 {
    sorted.partition_point(|&s| direction.compare(s, v).is_lt()) as u32 + 1
}

/// Sum of available scores, `None` when every score is unavailable.
pub fn total_score(scores: &[FactorScore]) -> Option<f64> {
    scores
        .iter()
        .filter_map(|s| s.score)
        .fold(None, |acc, s| Some(acc.unwrap_or(0.0) + s))
}

/// Turns a collection of derived metrics into a ranked sequence.
#[derive(Debug, Clone, Default)]
pub struct RankScorer {
    table: FactorTable,
}

impl RankScorer {
    /// Create a scorer over the given factor table.
    pub const fn new(table: FactorTable) -> Self {
        Self { table }
    }

    /// The factor table in use.
    pub const fn table(&self) -> &FactorTable {
        &self.table
    }

    /// Per-entity scores for one factor, aligned with `all`.
    pub fn factor_column(spec: &FactorSpec, all: &[DerivedMetrics]) -> Vec<Option<f64>> {
        let values: Vec<Option<f64>> = all.iter().map(|m| spec.kind.value_of(m)).collect();
        match spec.mode {
            ScoringMode::CompetitionRank(direction) => competition_ranks(&values, direction)
                .into_iter()
                .map(|rank| rank.map(f64::from))
                .collect(),
            ScoringMode::Scalar => values,
        }
    }

    /// Score and rank the whole collection.
    ///
    /// Entities with no available factor score are dropped. The result is
    /// ordered by rank; entities sharing a rank keep their input order.
    pub fn score(&self, all: &[DerivedMetrics]) -> Vec<RankedEntity> {
        let columns: Vec<Vec<Option<f64>>> = self
            .table
            .specs()
            .iter()
            .map(|spec| Self::factor_column(spec, all))
            .collect();

        for (spec, column) in self.table.specs().iter().zip(&columns) {
            tracing::debug!(
                factor = spec.kind.name(),
                available = column.iter().flatten().count(),
                universe = all.len(),
                "scored factor"
            );
        }

        let mut candidates = Vec::with_capacity(all.len());
        for (i, metrics) in all.iter().enumerate() {
            let factor_scores: Vec<FactorScore> = self
                .table
                .specs()
                .iter()
                .zip(&columns)
                .map(|(spec, column)| FactorScore {
                    factor: spec.kind,
                    score: column[i],
                })
                .collect();

            match total_score(&factor_scores) {
                Some(total) => candidates.push((metrics, factor_scores, total)),
                None => {
                    tracing::debug!(
                        entity = %metrics.name,
                        "no factor scores, excluded from ranking"
                    );
                }
            }
        }

        let totals = sorted_by(
            candidates.iter().map(|(_, _, t)| *t).collect(),
            Direction::Ascending,
        );

        let mut ranked: Vec<RankedEntity> = candidates
            .into_iter()
            .map(|(metrics, factor_scores, total_score)| RankedEntity {
                metrics: metrics.clone(),
                factor_scores,
                total_score,
                rank: position_of(&totals, total_score, Direction::Ascending),
            })
            .collect();

        ranked.sort_by_key(|r| r.rank);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::EarningsQuality;
    use rstest::rstest;

    fn metrics(name: &str) -> DerivedMetrics {
        DerivedMetrics {
            name: name.to_string(),
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

    #[rstest]
    #[case(
        vec![Some(3.0), Some(3.0), Some(5.0)],
        Direction::Ascending,
        vec![Some(1), Some(1), Some(3)]
    )]
    #[case(
        vec![Some(3.0), Some(3.0), Some(5.0)],
        Direction::Descending,
        vec![Some(2), Some(2), Some(1)]
    )]
    #[case(vec![Some(2.0), None, Some(1.0)], Direction::Ascending, vec![Some(2), None, Some(1)])]
    #[case(vec![None, None], Direction::Ascending, vec![None, None])]
    #[case(
        vec![Some(-1.0), Some(0.0), Some(-1.0), Some(4.0)],
        Direction::Descending,
        vec![Some(3), Some(2), Some(3), Some(1)]
    )]
    fn test_competition_ranks(
        #[case] values: Vec<Option<f64>>,
        #[case] direction: Direction,
        #[case] expected: Vec<Option<u32>>,
    ) {
        assert_eq!(competition_ranks(&values, direction), expected);
    }

    #[test]
    fn test_every_ranked_entity_gets_a_real_rank() {
        let mut a = metrics("A");
        a.pe = Some(12.0);
        let mut b = metrics("B");
        b.pe = Some(12.0);
        b.peg = Some(0.4);
        let ranked = RankScorer::new(FactorTable::base()).score(&[a, b]);

        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        assert!(ranked.iter().all(|r| r.rank as usize <= ranked.len()));
    }

    #[test]
    fn test_total_score_treats_missing_as_zero() {
        let scores = [
            FactorScore {
                factor: FactorKind::Peg,
                score: Some(2.0),
            },
            FactorScore {
                factor: FactorKind::PriceToBook,
                score: None,
            },
            FactorScore {
                factor: FactorKind::EarningsQuality,
                score: Some(0.0),
            },
        ];
        assert_eq!(total_score(&scores), Some(2.0));

        let none = [FactorScore {
            factor: FactorKind::Peg,
            score: None,
        }];
        assert_eq!(total_score(&none), None);
    }

    #[test]
    fn test_earnings_quality_is_not_ranked() {
        let mut good = metrics("Good");
        good.earnings_quality = EarningsQuality::Good;
        let mut poor = metrics("Poor");
        poor.earnings_quality = EarningsQuality::Poor;
        let unknown = metrics("Unknown");

        let spec = FactorSpec::scalar(FactorKind::EarningsQuality);
        let column = RankScorer::factor_column(&spec, &[good, poor, unknown]);
        assert_eq!(column, vec![Some(1.0), Some(0.0), None]);
    }

    #[test]
    fn test_tied_totals_share_rank_and_keep_order() {
        let mut a = metrics("A");
        a.pe = Some(10.0);
        let mut b = metrics("B");
        b.pe = Some(30.0);
        let mut c = metrics("C");
        c.pe = Some(10.0);

        let table = FactorTable::new(vec![FactorSpec::ranked(
            FactorKind::PriceToEarnings,
            Direction::Ascending,
        )]);
        let ranked = RankScorer::new(table).score(&[a, b, c]);

        let order: Vec<(&str, u32)> = ranked.iter().map(|r| (r.name(), r.rank)).collect();
        assert_eq!(order, vec![("A", 1), ("C", 1), ("B", 3)]);
    }

    #[test]
    fn test_fully_unavailable_entity_dropped() {
        let mut a = metrics("A");
        a.peg = Some(0.8);
        let b = metrics("B");

        let ranked = RankScorer::new(FactorTable::extended()).score(&[a, b]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name(), "A");
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(RankScorer::default().score(&[]).is_empty());
    }

    #[test]
    fn test_score_for() {
        let mut a = metrics("A");
        a.peg = Some(0.8);
        a.earnings_quality = EarningsQuality::Good;

        let ranked = RankScorer::new(FactorTable::extended()).score(&[a]);
        assert_eq!(ranked[0].score_for(FactorKind::Peg), Some(1.0));
        assert_eq!(ranked[0].score_for(FactorKind::EarningsQuality), Some(1.0));
        assert_eq!(ranked[0].score_for(FactorKind::PriceToBook), None);
        assert_eq!(ranked[0].total_score, 2.0);
    }
}
