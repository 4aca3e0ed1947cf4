//! Derived metrics for one company.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Whether operating cash flow backs up reported profit.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarningsQuality {
    /// Operating cash flow is at least net income
    #[display("good")]
    Good,
    /// Operating cash flow is below net income
    #[display("poor")]
    Poor,
    /// Cash flow or net income missing
    #[display("unknown")]
    Unknown,
}

impl EarningsQuality {
    /// Compare operating cash flow with net income.
    pub fn assess(operating_cash_flow: Option<f64>, net_income: Option<f64>) -> Self {
        match (operating_cash_flow, net_income) {
            (Some(cfo), Some(ni)) if cfo >= ni => Self::Good,
            (Some(_), Some(_)) => Self::Poor,
            _ => Self::Unknown,
        }
    }

    /// 1 for good, 0 for poor, unavailable otherwise.
    pub const fn score(self) -> Option<f64> {
        match self {
            Self::Good => Some(1.0),
            Self::Poor => Some(0.0),
            Self::Unknown => None,
        }
    }

    /// Tick, cross or N/A.
    pub const fn mark(self) -> &'static str {
        match self {
            Self::Good => "✔",
            Self::Poor => "✖",
            Self::Unknown => "N/A",
        }
    }
}

/// Metrics derived from one [`FundamentalsRecord`](nashik_data::FundamentalsRecord).
///
/// `None` means unavailable. Percentages are expressed as percent (5.0 = 5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Display name
    pub name: String,
    /// Exchange ticker
    pub symbol: Option<String>,
    /// Trailing P/E
    pub pe: Option<f64>,
    /// Forward P/E standing in for the industry P/E
    pub industry_pe: Option<f64>,
    /// P/E over assumed growth in percent
    pub peg: Option<f64>,
    /// Price to book
    pub price_to_book: Option<f64>,
    /// Debt to equity
    pub debt_to_equity: Option<f64>,
    /// Return on equity (%)
    pub roe_pct: Option<f64>,
    /// Cost of equity (%), always available
    pub coe_pct: f64,
    /// ROE minus CoE (%)
    pub roe_coe_spread_pct: Option<f64>,
    /// Return on invested capital (%)
    pub roic_pct: Option<f64>,
    /// Weighted average cost of capital (%)
    pub wacc_pct: Option<f64>,
    /// ROIC minus WACC (%)
    pub roic_wacc_spread_pct: Option<f64>,
    /// Cash flow versus net income
    pub earnings_quality: EarningsQuality,
    /// Dividend yield (%)
    pub dividend_yield_pct: Option<f64>,
    /// Market capitalization in crores
    pub market_cap_cr: Option<f64>,
    /// Last traded price
    pub price: Option<f64>,
}

impl DerivedMetrics {
    /// Earnings quality as a 0/1 scalar.
    pub const fn earnings_quality_score(&self) -> Option<f64> {
        self.earnings_quality.score()
    }

    /// Optional metrics paired with their names.
    pub fn optional_fields(&self) -> [(&'static str, Option<f64>); 14] {
        [
            ("pe", self.pe),
            ("industry_pe", self.industry_pe),
            ("peg", self.peg),
            ("price_to_book", self.price_to_book),
            ("debt_to_equity", self.debt_to_equity),
            ("roe_pct", self.roe_pct),
            ("roe_coe_spread_pct", self.roe_coe_spread_pct),
            ("roic_pct", self.roic_pct),
            ("wacc_pct", self.wacc_pct),
            ("roic_wacc_spread_pct", self.roic_wacc_spread_pct),
            ("dividend_yield_pct", self.dividend_yield_pct),
            ("market_cap_cr", self.market_cap_cr),
            ("price", self.price),
            ("earnings_quality_score", self.earnings_quality_score()),
        ]
    }

    /// Names of metrics that are unavailable.
    pub fn unavailable_fields(&self) -> Vec<&'static str> {
        self.optional_fields()
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| name)
            .collect()
    }
}
