//! Export module for the statement tracker
//!
//! Serializes the current aggregate tables:
//! - CSV: `Month,Type,Category,Amount`, one row per month and category
//! - JSON / YAML: the same rows plus monthly totals, with schema metadata

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use crate::error::TrackerResult;
use crate::services::Aggregates;

pub use self::csv::export_summary_csv;
pub use json::{export_summary_json, EntryType, MonthTotals, SummaryExport, SummaryRow, EXPORT_SCHEMA_VERSION};
pub use yaml::export_summary_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

/// Write the aggregates in the chosen format
pub fn export_summary<W: Write>(
    aggregates: &Aggregates,
    format: ExportFormat,
    writer: &mut W,
) -> TrackerResult<()> {
    match format {
        ExportFormat::Csv => export_summary_csv(aggregates, writer),
        ExportFormat::Json => export_summary_json(aggregates, writer),
        ExportFormat::Yaml => export_summary_yaml(aggregates, writer),
    }
}
