//! Financial analysis report
//!
//! Totals and monthly averages over every month present, plus a trend line
//! per month with the change in net against the previous month.

use crate::models::Money;
use crate::services::Aggregates;

/// One month of the trend
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTrend {
    pub month: String,
    pub income: Money,
    pub spending: Money,
    pub net: Money,
    /// Percent change in net versus the previous month; `None` for the first
    /// month. A previous net of zero reports 0%.
    pub net_change_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialAnalysis {
    pub total_income: Money,
    pub average_income: Money,
    pub average_spending: Money,
    pub average_net: Money,
    pub trends: Vec<MonthTrend>,
}

impl FinancialAnalysis {
    pub fn generate(aggregates: &Aggregates) -> Self {
        let mut trends: Vec<MonthTrend> = Vec::new();
        for month in aggregates.months() {
            let income = aggregates.income_for_month(month);
            let spending = aggregates.spending_for_month(month);
            let net = income - spending;
            let net_change_percent = trends.last().map(|prev| percent_change(prev.net, net));
            trends.push(MonthTrend {
                month: month.to_string(),
                income,
                spending,
                net,
                net_change_percent,
            });
        }

        let total_income: Money = trends.iter().map(|t| t.income).sum();
        let total_spending: Money = trends.iter().map(|t| t.spending).sum();
        let total_net: Money = trends.iter().map(|t| t.net).sum();
        let months = trends.len();

        Self {
            total_income,
            average_income: average(total_income, months),
            average_spending: average(total_spending, months),
            average_net: average(total_net, months),
            trends,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }

    /// Format the analysis for terminal display
    pub fn format_terminal(&self) -> String {
        if self.trends.is_empty() {
            return "No analysis available.\n".to_string();
        }

        let mut output = String::from("=== Financial Analysis ===\n");
        output.push_str(&format!("Total income: {}\n", self.total_income));
        output.push_str(&format!("Average monthly income: {}\n", self.average_income));
        output.push_str(&format!("Average monthly spending: {}\n", self.average_spending));
        output.push_str(&format!("Average monthly net: {}\n\n", self.average_net));
        output.push_str("Monthly Trends:\n");

        for trend in &self.trends {
            let change = match trend.net_change_percent {
                Some(change) => format!("({:+.2}% change)", change),
                None => "(N/A)".to_string(),
            };
            output.push_str(&format!(
                "{}: Net {} {}  Expenses {}  Income {}\n",
                trend.month, trend.net, change, trend.spending, trend.income
            ));
        }
        output
    }
}

fn percent_change(previous: Money, current: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current - previous).pence() as f64 / previous.pence() as f64 * 100.0
}

fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::zero();
    }
    Money::from_pence((total.pence() as f64 / count as f64).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::NaiveDate;

    fn txn(m: u32, pence: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, m, 1).unwrap(),
            "Store",
            Money::from_pence(pence),
            "None",
        )
    }

    #[test]
    fn test_trends_and_averages() {
        let aggregates = Aggregates::compute(&[
            txn(1, 10000),
            txn(1, -5000),
            txn(2, 10000),
            txn(2, -2500),
            txn(3, -1000),
        ]);
        let analysis = FinancialAnalysis::generate(&aggregates);

        assert_eq!(analysis.total_income, Money::from_pence(20000));
        assert_eq!(analysis.average_income, Money::from_pence(6667));
        assert_eq!(analysis.average_spending, Money::from_pence(2833));
        assert_eq!(analysis.average_net, Money::from_pence(3833));

        assert_eq!(analysis.trends[0].net_change_percent, None);
        assert_eq!(analysis.trends[1].net_change_percent, Some(50.0));
        // 7500 -> -1000
        let change = analysis.trends[2].net_change_percent.unwrap();
        assert!((change - (-113.333)).abs() < 0.01);
    }

    #[test]
    fn test_zero_previous_net() {
        let aggregates = Aggregates::compute(&[txn(1, 1000), txn(1, -1000), txn(2, 500)]);
        let analysis = FinancialAnalysis::generate(&aggregates);
        assert_eq!(analysis.trends[1].net_change_percent, Some(0.0));
    }

    #[test]
    fn test_format_terminal() {
        let aggregates = Aggregates::compute(&[txn(1, 10000), txn(2, 15000)]);
        let text = FinancialAnalysis::generate(&aggregates).format_terminal();
        assert!(text.contains("2024-01: Net £100.00 (N/A)"));
        assert!(text.contains("(+50.00% change)"));
    }

    #[test]
    fn test_empty() {
        let analysis = FinancialAnalysis::generate(&Aggregates::default());
        assert!(analysis.is_empty());
        assert!(analysis.average_net.is_zero());
        assert_eq!(analysis.format_terminal(), "No analysis available.\n");
    }
}
