//! Monthly summary report
//!
//! Per month: income, spending and net, followed by the income and spending
//! breakdowns by category, largest first.

use crate::models::{Money, Period};
use crate::services::Aggregates;

/// One month of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: String,
    pub income: Money,
    pub spending: Money,
    pub net: Money,
    pub income_breakdown: Vec<(String, Money)>,
    pub spending_breakdown: Vec<(String, Money)>,
}

/// Monthly summary over the active partition
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummaryReport {
    pub months: Vec<MonthSummary>,
}

impl MonthlySummaryReport {
    /// Build the summary, optionally restricted to the months of a period
    pub fn generate(aggregates: &Aggregates, period: &Period) -> Self {
        let months = aggregates
            .months()
            .into_iter()
            .filter(|month| period.covers_month_key(month))
            .map(|month| {
                // Month keys always parse; fall back to an empty breakdown otherwise
                let breakdown = month
                    .parse::<Period>()
                    .map(|p| aggregates.breakdown(&p))
                    .ok();
                let (income_breakdown, spending_breakdown) = breakdown
                    .map(|b| (b.income_by_category, b.spending_by_category))
                    .unwrap_or_default();

                let income = aggregates.income_for_month(month);
                let spending = aggregates.spending_for_month(month);
                MonthSummary {
                    month: month.to_string(),
                    income,
                    spending,
                    net: income - spending,
                    income_breakdown,
                    spending_breakdown,
                }
            })
            .collect();

        Self { months }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        if self.months.is_empty() {
            return "No summary available.\n".to_string();
        }

        let mut output = String::new();
        for month in &self.months {
            output.push_str(&format!("--- {} ---\n", month.month));
            output.push_str(&format!("Total Income: {}\n", month.income));
            output.push_str(&format!("Total Spending: {}\n", month.spending));
            output.push_str(&format!("Net: {}\n\n", month.net));

            output.push_str("Income Breakdown:\n");
            for (category, amount) in &month.income_breakdown {
                output.push_str(&format!("  {}: {}\n", category, amount));
            }
            output.push_str("\nSpending Breakdown:\n");
            for (category, amount) in &month.spending_breakdown {
                output.push_str(&format!("  {}: {}\n", category, amount));
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::NaiveDate;

    fn txn(m: u32, d: u32, pence: i64, category: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
            "Store",
            Money::from_pence(pence),
            category,
        )
    }

    #[test]
    fn test_generate_summary() {
        let aggregates = Aggregates::compute(&[
            txn(1, 15, -2350, "Groceries"),
            txn(1, 16, -5000, "Rent"),
            txn(1, 20, 200000, "Salary"),
            txn(2, 1, -100, "Groceries"),
        ]);
        let report = MonthlySummaryReport::generate(&aggregates, &Period::Total);

        assert_eq!(report.months.len(), 2);
        let january = &report.months[0];
        assert_eq!(january.month, "2024-01");
        assert_eq!(january.net, Money::from_pence(192650));
        assert_eq!(january.spending_breakdown[0].0, "Rent");
        assert!(report.months[1].income_breakdown.is_empty());

        let text = report.format_terminal();
        assert!(text.contains("--- 2024-01 ---"));
        assert!(text.contains("Total Income: £2000.00"));
        assert!(text.contains("  Rent: £50.00"));
    }

    #[test]
    fn test_period_restriction() {
        let aggregates = Aggregates::compute(&[txn(1, 15, -2350, "Groceries"), txn(2, 1, -100, "Fuel")]);
        let report = MonthlySummaryReport::generate(&aggregates, &Period::Month(2024, 2));
        assert_eq!(report.months.len(), 1);
        assert_eq!(report.months[0].month, "2024-02");
    }

    #[test]
    fn test_empty_summary() {
        let report = MonthlySummaryReport::generate(&Aggregates::default(), &Period::Total);
        assert!(report.is_empty());
        assert_eq!(report.format_terminal(), "No summary available.\n");
    }
}
