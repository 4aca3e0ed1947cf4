//! Raw per-company fundamentals.

use serde::{Deserialize, Serialize};

/// Raw fundamentals for one company, as handed over by the fetch side.
///
/// Every numeric field is optional. Absence is carried through to the derived
/// metrics rather than replaced with a default. Field names follow snake_case;
/// the market-data provider's camelCase keys are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalsRecord {
    /// Display name, unique within a snapshot
    #[serde(alias = "company", alias = "Company")]
    pub name: String,
    /// Exchange ticker (informational)
    pub symbol: Option<String>,
    /// Trailing twelve-month P/E
    #[serde(alias = "trailingPE")]
    pub trailing_pe: Option<f64>,
    /// Forward P/E, used as the industry P/E proxy
    #[serde(alias = "forwardPE")]
    pub forward_pe: Option<f64>,
    /// Price to book
    #[serde(alias = "priceToBook")]
    pub price_to_book: Option<f64>,
    /// Debt to equity as reported by the provider
    #[serde(alias = "debtToEquity")]
    pub debt_to_equity: Option<f64>,
    /// Dividend yield as a fraction (0.02 = 2%)
    #[serde(alias = "dividendYield")]
    pub dividend_yield: Option<f64>,
    /// Market capitalization in rupees
    #[serde(alias = "marketCap")]
    pub market_cap: Option<f64>,
    /// Last traded price
    #[serde(alias = "currentPrice")]
    pub current_price: Option<f64>,
    /// Equity beta
    pub beta: Option<f64>,
    /// Return on equity as a fraction
    #[serde(alias = "returnOnEquity")]
    pub return_on_equity: Option<f64>,
    /// Operating profit (EBIT)
    pub ebit: Option<f64>,
    /// EBITDA, used when EBIT is not reported
    pub ebitda: Option<f64>,
    /// Effective tax rate as a fraction
    #[serde(alias = "taxRate", alias = "effectiveTaxRate")]
    pub tax_rate: Option<f64>,
    /// Total debt
    #[serde(alias = "totalDebt")]
    pub total_debt: Option<f64>,
    /// Total stockholders' equity
    #[serde(alias = "totalStockholderEquity", alias = "totalEquity")]
    pub total_equity: Option<f64>,
    /// Most recent annual net income
    #[serde(alias = "netIncome")]
    pub net_income: Option<f64>,
    /// Most recent annual operating cash flow
    #[serde(alias = "operatingCashFlow", alias = "cfo")]
    pub operating_cash_flow: Option<f64>,
}

impl FundamentalsRecord {
    /// Create an empty record for the given company.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the exchange ticker.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// EBIT, falling back to EBITDA.
    pub const fn ebit_or_ebitda(&self) -> Option<f64> {
        match self.ebit {
            Some(ebit) => Some(ebit),
            None => self.ebitda,
        }
    }

    /// All numeric fields paired with their field name, in declaration order.
    pub const fn numeric_fields(&self) -> [(&'static str, Option<f64>); 16] {
        [
            ("trailing_pe", self.trailing_pe),
            ("forward_pe", self.forward_pe),
            ("price_to_book", self.price_to_book),
            ("debt_to_equity", self.debt_to_equity),
            ("dividend_yield", self.dividend_yield),
            ("market_cap", self.market_cap),
            ("current_price", self.current_price),
            ("beta", self.beta),
            ("return_on_equity", self.return_on_equity),
            ("ebit", self.ebit),
            ("ebitda", self.ebitda),
            ("tax_rate", self.tax_rate),
            ("total_debt", self.total_debt),
            ("total_equity", self.total_equity),
            ("net_income", self.net_income),
            ("operating_cash_flow", self.operating_cash_flow),
        ]
    }

    /// Names of supplied fields holding NaN or an infinity.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        self.numeric_fields()
            .into_iter()
            .filter_map(|(field, value)| match value {
                Some(v) if !v.is_finite() => Some(field),
                _ => None,
            })
            .collect()
    }
}
