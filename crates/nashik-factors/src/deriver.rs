//! Metric derivation from raw fundamentals.
//!
//! Each formula is guarded: when an operand is missing, only the metrics that
//! depend on it become unavailable. Debt and equity are the exception and
//! count as zero inside invested capital.

use crate::constants::ValuationConstants;
use crate::error::{FactorsError, Result};
use crate::metrics::{DerivedMetrics, EarningsQuality};
use nashik_data::FundamentalsRecord;

const CRORE: f64 = 1e7;

/// Derives [`DerivedMetrics`] from a [`FundamentalsRecord`].
#[derive(Debug, Clone, Default)]
pub struct MetricDeriver {
    constants: ValuationConstants,
}

impl MetricDeriver {
    /// Create a deriver with the given constants.
    pub const fn with_constants(constants: ValuationConstants) -> Self {
        Self { constants }
    }

    /// The constants in use.
    pub const fn constants(&self) -> &ValuationConstants {
        &self.constants
    }

    /// Cost of equity as a fraction (CAPM).
    pub fn cost_of_equity(&self, beta: Option<f64>) -> f64 {
        let c = &self.constants;
        c.risk_free_rate + beta.unwrap_or(c.default_beta) * c.market_risk_premium
    }

    /// P/E over the assumed growth rate expressed in percent.
    pub fn peg(&self, trailing_pe: Option<f64>) -> Option<f64> {
        trailing_pe.map(|pe| pe / (self.constants.assumed_eps_growth * 100.0))
    }

    /// Derive every metric for one record.
    ///
    /// # Errors
    ///
    /// Returns [`FactorsError::Derivation`] if the record is malformed (blank
    /// name, non-finite input) or a metric comes out non-finite.
    pub fn derive(&self, record: &FundamentalsRecord) -> Result<DerivedMetrics> {
        if record.name.trim().is_empty() {
            return Err(FactorsError::derivation("<unnamed>", "blank entity name"));
        }
        let bad = record.non_finite_fields();
        if !bad.is_empty() {
            return Err(FactorsError::derivation(
                &record.name,
                format!("non-finite value in {}", bad.join(", ")),
            ));
        }

        let c = &self.constants;
        let tax_rate = record.tax_rate.unwrap_or(c.default_tax_rate);

        let coe = self.cost_of_equity(record.beta);
        let coe_pct = coe * 100.0;

        let roe_pct = record.return_on_equity.map(|roe| roe * 100.0);
        let roe_coe_spread_pct = roe_pct.map(|roe| roe - coe_pct);

        let nopat = record.ebit_or_ebitda().map(|ebit| ebit * (1.0 - tax_rate));
        let debt = record.total_debt.unwrap_or(0.0);
        let equity = record.total_equity.unwrap_or(0.0);
        let invested_capital = debt + equity;

        let (roic_pct, wacc_pct) = if invested_capital == 0.0 {
            (None, None)
        } else {
            let equity_weight = equity / invested_capital;
            let debt_weight = debt / invested_capital;
            let wacc = equity_weight * coe + debt_weight * c.cost_of_debt * (1.0 - tax_rate);
            (
                nopat.map(|n| n / invested_capital * 100.0),
                Some(wacc * 100.0),
            )
        };
        let roic_wacc_spread_pct = roic_pct.zip(wacc_pct).map(|(roic, wacc)| roic - wacc);

        let metrics = DerivedMetrics {
            name: record.name.clone(),
            symbol: record.symbol.clone(),
            pe: record.trailing_pe,
            industry_pe: record.forward_pe,
            peg: self.peg(record.trailing_pe),
            price_to_book: record.price_to_book,
            debt_to_equity: record.debt_to_equity,
            roe_pct,
            coe_pct,
            roe_coe_spread_pct,
            roic_pct,
            wacc_pct,
            roic_wacc_spread_pct,
            earnings_quality: EarningsQuality::assess(
                record.operating_cash_flow,
                record.net_income,
            ),
            dividend_yield_pct: record.dividend_yield.map(|y| y * 100.0),
            market_cap_cr: record.market_cap.map(|cap| cap / CRORE),
            price: record.current_price,
        };

        ensure_finite(&metrics)?;
        Ok(metrics)
    }
}

fn ensure_finite(metrics: &DerivedMetrics) -> Result<()> {
    if !metrics.coe_pct.is_finite() {
        return Err(FactorsError::derivation(&metrics.name, "cost of equity overflowed"));
    }
    match metrics
        .optional_fields()
        .into_iter()
        .find(|(_, v)| v.is_some_and(|x| !x.is_finite()))
    {
        Some((field, _)) => Err(FactorsError::derivation(
            &metrics.name,
            format!("{field} is not finite"),
        )),
        None => Ok(()),
    }
}
