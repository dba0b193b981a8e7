//! YAML export of the monthly aggregates

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::services::Aggregates;

use super::json::SummaryExport;

/// Export the aggregates as YAML with a short comment header
pub fn export_summary_yaml<W: Write>(aggregates: &Aggregates, writer: &mut W) -> TrackerResult<()> {
    let export = SummaryExport::from_aggregates(aggregates);

    writeln!(writer, "# Statement summary export")
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}
