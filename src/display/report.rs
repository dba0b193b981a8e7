//! Breakdown, store totals, ignore list and settings formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::IgnoreKey;
use crate::reports::StoreTotalsReport;
use crate::services::PeriodBreakdown;

#[derive(Tabled)]
struct AmountRow<'a> {
    #[tabled(rename = "Category")]
    category: &'a str,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct StoreRow<'a> {
    #[tabled(rename = "Store")]
    store: &'a str,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Outgoing")]
    outgoing: String,
}

#[derive(Tabled)]
struct IgnoreRow<'a> {
    #[tabled(rename = "Date")]
    date: &'a str,
    #[tabled(rename = "Store")]
    store: &'a str,
}

#[derive(Tabled)]
struct SettingRow<'a> {
    #[tabled(rename = "Setting")]
    key: &'a str,
    #[tabled(rename = "Value")]
    value: &'a str,
}

fn amount_table(rows: &[(String, crate::models::Money)]) -> String {
    if rows.is_empty() {
        return "  (none)\n".to_string();
    }
    let table_rows = rows.iter().map(|(category, amount)| AmountRow {
        category,
        amount: amount.to_string(),
    });
    let mut output = Table::new(table_rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// Format a period breakdown: totals, then income and spending by category
pub fn format_breakdown(breakdown: &PeriodBreakdown) -> String {
    let mut output = String::new();
    output.push_str(&format!("Period: {}\n", breakdown.period));
    output.push_str(&format!("Total Income:   {}\n", breakdown.total_income));
    output.push_str(&format!("Total Spending: {}\n", breakdown.total_spending));
    output.push_str(&format!("Net:            {}\n\n", breakdown.net));

    output.push_str("Income by category:\n");
    output.push_str(&amount_table(&breakdown.income_by_category));
    output.push_str("\nSpending by category:\n");
    output.push_str(&amount_table(&breakdown.spending_by_category));
    output
}

pub fn format_store_totals(report: &StoreTotalsReport) -> String {
    if report.rows.is_empty() {
        return "No transactions loaded.\n".to_string();
    }
    let rows = report.rows.iter().map(|row| StoreRow {
        store: &row.store,
        income: row.income.to_string(),
        outgoing: row.outgoing.to_string(),
    });
    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

pub fn format_ignore_list(entries: &[IgnoreKey]) -> String {
    if entries.is_empty() {
        return "Ignore list is empty.\n".to_string();
    }
    let rows = entries.iter().map(|key| IgnoreRow {
        date: &key.date,
        store: &key.store,
    });
    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// One period per line
pub fn format_periods(periods: &[String]) -> String {
    let mut output = String::new();
    for period in periods {
        output.push_str(period);
        output.push('\n');
    }
    output
}

pub fn format_settings(settings: &Settings) -> String {
    let rows = settings.rows();
    let table_rows = rows.iter().map(|(key, value)| SettingRow { key, value });
    let mut output = Table::new(table_rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}
