//! CSV and JSON export of ranking reports.

use crate::report::RankingReport;
use nashik_factors::Edition;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced bytes that are not UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Column headers of the ranking CSV, in order.
pub fn csv_headers(edition: Edition) -> Vec<&'static str> {
    let mut headers = vec![
        "Rank",
        "Company",
        "P/E",
        "Industry P/E",
        "PEG",
        "ROE (%)",
        "CoE (%)",
        "ROE − CoE (%)",
    ];
    if edition.is_extended() {
        headers.extend(["ROIC (%)", "WACC (%)", "ROIC − WACC (%)"]);
    }
    headers.extend([
        "P/B",
        "D/E",
        "Dividend Yield (%)",
        "Earnings Quality (CFO ≥ Net Profit)",
        "Market Cap (₹ Cr)",
        "Price (₹)",
        "Total Score",
    ]);
    headers
}

fn decimal(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

impl RankingReport {
    fn to_csv(&self) -> Result<String, ExportError> {
        let extended = self.edition.is_extended();
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(csv_headers(self.edition))?;

        for row in &self.rows {
            let m = &row.entity.metrics;
            let mut record = vec![
                row.entity.rank.to_string(),
                m.name.clone(),
                decimal(m.pe),
                decimal(m.industry_pe),
                decimal(m.peg),
                decimal(m.roe_pct),
                decimal(Some(m.coe_pct)),
                decimal(m.roe_coe_spread_pct),
            ];
            if extended {
                record.extend([
                    decimal(m.roic_pct),
                    decimal(m.wacc_pct),
                    decimal(m.roic_wacc_spread_pct),
                ]);
            }
            record.extend([
                decimal(m.price_to_book),
                decimal(m.debt_to_equity),
                decimal(m.dividend_yield_pct),
                m.earnings_quality.mark().to_string(),
                decimal(m.market_cap_cr),
                decimal(m.price),
                decimal(Some(row.entity.total_score)),
            ]);
            wtr.write_record(&record)?;
        }

        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl Exporter for RankingReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
