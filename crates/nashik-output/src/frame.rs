//! Polars view of a ranking.

use crate::report::RankedRow;
use polars::prelude::*;

/// One row per ranked company, unavailable metrics as nulls.
///
/// Column names are snake_case versions of the CSV headers.
pub fn ranking_frame(rows: &[RankedRow]) -> PolarsResult<DataFrame> {
    let metric = |f: fn(&RankedRow) -> Option<f64>| rows.iter().map(f).collect::<Vec<_>>();

    let ranks: Vec<u32> = rows.iter().map(|r| r.entity.rank).collect();
    let names: Vec<String> = rows.iter().map(|r| r.entity.metrics.name.clone()).collect();
    let symbols: Vec<Option<String>> = rows
        .iter()
        .map(|r| r.entity.metrics.symbol.clone())
        .collect();
    let quality: Vec<String> = rows
        .iter()
        .map(|r| r.entity.metrics.earnings_quality.to_string())
        .collect();
    let totals: Vec<f64> = rows.iter().map(|r| r.entity.total_score).collect();

    DataFrame::new(vec![
        Series::new("rank".into(), ranks).into(),
        Series::new("company".into(), names).into(),
        Series::new("symbol".into(), symbols).into(),
        Series::new("pe".into(), metric(|r| r.entity.metrics.pe)).into(),
        Series::new("industry_pe".into(), metric(|r| r.entity.metrics.industry_pe)).into(),
        Series::new("peg".into(), metric(|r| r.entity.metrics.peg)).into(),
        Series::new("roe_pct".into(), metric(|r| r.entity.metrics.roe_pct)).into(),
        Series::new("coe_pct".into(), metric(|r| Some(r.entity.metrics.coe_pct))).into(),
        Series::new(
            "roe_coe_spread_pct".into(),
            metric(|r| r.entity.metrics.roe_coe_spread_pct),
        )
        .into(),
        Series::new("roic_pct".into(), metric(|r| r.entity.metrics.roic_pct)).into(),
        Series::new("wacc_pct".into(), metric(|r| r.entity.metrics.wacc_pct)).into(),
        Series::new(
            "roic_wacc_spread_pct".into(),
            metric(|r| r.entity.metrics.roic_wacc_spread_pct),
        )
        .into(),
        Series::new("price_to_book".into(), metric(|r| r.entity.metrics.price_to_book)).into(),
        Series::new("debt_to_equity".into(), metric(|r| r.entity.metrics.debt_to_equity)).into(),
        Series::new(
            "dividend_yield_pct".into(),
            metric(|r| r.entity.metrics.dividend_yield_pct),
        )
        .into(),
        Series::new("earnings_quality".into(), quality).into(),
        Series::new("market_cap_cr".into(), metric(|r| r.entity.metrics.market_cap_cr)).into(),
        Series::new("price".into(), metric(|r| r.entity.metrics.price)).into(),
        Series::new("total_score".into(), totals).into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryGenerator;
    use nashik_data::FundamentalsRecord;
    use nashik_factors::{Edition, MetricDeriver, RankScorer};

    fn rows() -> Vec<RankedRow> {
        let deriver = MetricDeriver::default();
        let metrics = vec![
            deriver
                .derive(&FundamentalsRecord {
                    trailing_pe: Some(22.0),
                    price_to_book: Some(3.1),
                    ..FundamentalsRecord::new("Vesuvius India").with_symbol("VESUVIUS.NS")
                })
                .unwrap(),
            deriver
                .derive(&FundamentalsRecord {
                    trailing_pe: Some(11.0),
                    ..FundamentalsRecord::new("Gujarat Pipavav")
                })
                .unwrap(),
        ];
        let generator = SummaryGenerator::for_edition(Edition::Extended);
        RankScorer::default()
            .score(&metrics)
            .into_iter()
            .map(|entity| RankedRow {
                summary: generator.summarize(&entity),
                entity,
            })
            .collect()
    }

    #[test]
    fn test_frame_shape() {
        let df = ranking_frame(&rows()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 19);
    }

    #[test]
    fn test_unavailable_metrics_are_null() {
        let df = ranking_frame(&rows()).unwrap();
        assert_eq!(df.column("price_to_book").unwrap().null_count(), 1);
        assert_eq!(df.column("roic_pct").unwrap().null_count(), 2);
        assert_eq!(df.column("symbol").unwrap().null_count(), 1);
        assert_eq!(df.column("pe").unwrap().null_count(), 0);
    }

    #[test]
    fn test_empty_frame() {
        let df = ranking_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 19);
    }
}
