//! Run-wide valuation assumptions.

use crate::error::{FactorsError, Result};
use serde::{Deserialize, Serialize};

/// Valuation assumptions shared by every company in a run.
///
/// PEG uses `assumed_eps_growth` for all companies rather than a per-company
/// growth estimate, so it is only an approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConstants {
    /// Risk-free rate (default: 0.065)
    pub risk_free_rate: f64,
    /// Equity market risk premium (default: 0.06)
    pub market_risk_premium: f64,
    /// EPS growth assumed for PEG (default: 0.21)
    pub assumed_eps_growth: f64,
    /// Pre-tax cost of debt (default: 0.08)
    pub cost_of_debt: f64,
    /// Beta used when the record has none (default: 1.0)
    pub default_beta: f64,
    /// Tax rate used when the record has none (default: 0.25)
    pub default_tax_rate: f64,
}

impl Default for ValuationConstants {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.065,
            market_risk_premium: 0.06,
            assumed_eps_growth: 0.21,
            cost_of_debt: 0.08,
            default_beta: 1.0,
            default_tax_rate: 0.25,
        }
    }
}

impl ValuationConstants {
    /// Check that every constant is finite and growth is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`FactorsError::InvalidConstants`] naming the first bad constant.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("risk_free_rate", self.risk_free_rate),
            ("market_risk_premium", self.market_risk_premium),
            ("assumed_eps_growth", self.assumed_eps_growth),
            ("cost_of_debt", self.cost_of_debt),
            ("default_beta", self.default_beta),
            ("default_tax_rate", self.default_tax_rate),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FactorsError::InvalidConstants(format!("{name} is not finite")));
        }
        if self.assumed_eps_growth == 0.0 {
            return Err(FactorsError::InvalidConstants(
                "assumed_eps_growth must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ValuationConstants::default();
        assert_eq!(c.risk_free_rate, 0.065);
        assert_eq!(c.market_risk_premium, 0.06);
        assert_eq!(c.assumed_eps_growth, 0.21);
        assert_eq!(c.cost_of_debt, 0.08);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_zero_growth_rejected() {
        let c = ValuationConstants {
            assumed_eps_growth: 0.0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(FactorsError::InvalidConstants(_))));
    }

    #[test]
    fn test_nan_rejected() {
        let c = ValuationConstants {
            cost_of_debt: f64::NAN,
            ..Default::default()
        };
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("cost_of_debt"));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let c: ValuationConstants = serde_json::from_str(r#"{"risk_free_rate": 0.07}"#).unwrap();
        assert_eq!(c.risk_free_rate, 0.07);
        assert_eq!(c.market_risk_premium, 0.06);
    }
}
