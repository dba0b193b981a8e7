//! JSON export of the monthly aggregates, with schema versioning

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::services::Aggregates;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Income or spending row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    Income,
    Spending,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "Income",
            EntryType::Spending => "Spending",
        }
    }
}

/// One month/category total; amounts are fixed two-decimal strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub month: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub amount: String,
}

impl SummaryRow {
    /// All rows in export order: months ascending, income before spending,
    /// categories ascending
    pub fn collect(aggregates: &Aggregates) -> Vec<Self> {
        let mut rows = Vec::new();
        for month in aggregates.months() {
            let sections = [
                (EntryType::Income, aggregates.summary_income.get(month)),
                (EntryType::Spending, aggregates.summary_spending.get(month)),
            ];
            for (entry_type, categories) in sections {
                for (category, amount) in categories.into_iter().flatten() {
                    rows.push(SummaryRow {
                        month: month.to_string(),
                        entry_type,
                        category: category.clone(),
                        amount: amount.to_decimal_string(),
                    });
                }
            }
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    pub month: String,
    pub income: String,
    pub spending: String,
    pub net: String,
}

/// Aggregate snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub monthly_totals: Vec<MonthTotals>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryExport {
    pub fn from_aggregates(aggregates: &Aggregates) -> Self {
        let monthly_totals = aggregates
            .months()
            .into_iter()
            .map(|month| {
                let income = aggregates.income_for_month(month);
                let spending = aggregates.spending_for_month(month);
                MonthTotals {
                    month: month.to_string(),
                    income: income.to_decimal_string(),
                    spending: spending.to_decimal_string(),
                    net: (income - spending).to_decimal_string(),
                }
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            monthly_totals,
            rows: SummaryRow::collect(aggregates),
        }
    }
}

/// Export the aggregates as pretty-printed JSON
pub fn export_summary_json<W: Write>(aggregates: &Aggregates, writer: &mut W) -> TrackerResult<()> {
    let export = SummaryExport::from_aggregates(aggregates);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}
