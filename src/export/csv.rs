//! CSV export of the monthly aggregates

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::services::Aggregates;

use super::json::SummaryRow;

const HEADER: [&str; 4] = ["Month", "Type", "Category", "Amount"];

/// Write `Month,Type,Category,Amount` rows: for each month, income categories
/// then spending categories. Spending amounts are positive.
pub fn export_summary_csv<W: Write>(aggregates: &Aggregates, writer: &mut W) -> TrackerResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(HEADER)
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    for row in SummaryRow::collect(aggregates) {
        csv_writer
            .write_record([
                row.month.as_str(),
                row.entry_type.as_str(),
                row.category.as_str(),
                row.amount.as_str(),
            ])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}
