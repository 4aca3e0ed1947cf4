#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nashik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod frame;
pub mod report;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter, csv_headers};
pub use frame::ranking_frame;
pub use report::{
    EntityWarning, RankedRow, RankingReport, ReportBuilder, ReportError, WarningKind,
    explanation_ascii_table,
};
pub use summary::{Statement, Summary, SummaryGenerator, SummaryRule};
