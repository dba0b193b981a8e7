//! Aggregation engine
//!
//! Derives monthly per-category income and spending tables from the active
//! partition. The tables hold no state of their own: they are rebuilt from
//! scratch by [`Aggregates::compute`] after every mutation and never patched.
//! Yearly and all-time views are summed from the month keys on demand.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{Money, Period, Transaction};

/// Month key ("YYYY-MM") to category to total
pub type MonthlyCategoryTotals = BTreeMap<String, BTreeMap<String, Money>>;

/// Month key ("YYYY-MM") to total
pub type MonthlyTotals = BTreeMap<String, Money>;

/// Aggregate tables over the active partition
///
/// Spending totals are stored as positive amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub summary_spending: MonthlyCategoryTotals,
    pub summary_income: MonthlyCategoryTotals,
    pub monthly_totals_spending: MonthlyTotals,
    pub monthly_totals_income: MonthlyTotals,
}

impl Aggregates {
    /// Full recomputation in a single pass. Zero amounts contribute nothing.
    pub fn compute(active: &[Transaction]) -> Self {
        let mut aggregates = Self::default();

        for txn in active {
            let (summary, totals, amount) = if txn.amount.is_negative() {
                (
                    &mut aggregates.summary_spending,
                    &mut aggregates.monthly_totals_spending,
                    txn.amount.abs(),
                )
            } else if txn.amount.is_positive() {
                (
                    &mut aggregates.summary_income,
                    &mut aggregates.monthly_totals_income,
                    txn.amount,
                )
            } else {
                continue;
            };

            let month = txn.month_key();
            *summary
                .entry(month.clone())
                .or_default()
                .entry(txn.category.clone())
                .or_default() += amount;
            *totals.entry(month).or_default() += amount;
        }

        aggregates
    }

    /// Every month with income or spending, sorted
    pub fn months(&self) -> Vec<&str> {
        self.monthly_totals_income
            .keys()
            .chain(self.monthly_totals_spending.keys())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_totals_income.is_empty() && self.monthly_totals_spending.is_empty()
    }

    pub fn income_for_month(&self, month: &str) -> Money {
        self.monthly_totals_income
            .get(month)
            .copied()
            .unwrap_or_default()
    }

    pub fn spending_for_month(&self, month: &str) -> Money {
        self.monthly_totals_spending
            .get(month)
            .copied()
            .unwrap_or_default()
    }

    /// Total income over every month inside the period
    pub fn total_income(&self, period: &Period) -> Money {
        sum_months(&self.monthly_totals_income, period)
    }

    /// Total spending over every month inside the period
    pub fn total_spending(&self, period: &Period) -> Money {
        sum_months(&self.monthly_totals_spending, period)
    }

    /// Per-category breakdown for a month, a year or all time
    pub fn breakdown(&self, period: &Period) -> PeriodBreakdown {
        let income_by_category = sort_descending(merge_categories(&self.summary_income, period));
        let spending_by_category =
            sort_descending(merge_categories(&self.summary_spending, period));
        let total_income = self.total_income(period);
        let total_spending = self.total_spending(period);

        PeriodBreakdown {
            period: *period,
            income_by_category,
            spending_by_category,
            total_income,
            total_spending,
            net: total_income - total_spending,
        }
    }
}

/// Category totals for one reporting period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBreakdown {
    pub period: Period,
    /// Sorted by amount, largest first
    pub income_by_category: Vec<(String, Money)>,
    /// Sorted by amount, largest first
    pub spending_by_category: Vec<(String, Money)>,
    pub total_income: Money,
    pub total_spending: Money,
    pub net: Money,
}

fn sum_months(totals: &MonthlyTotals, period: &Period) -> Money {
    totals
        .iter()
        .filter(|(month, _)| period.covers_month_key(month))
        .map(|(_, amount)| *amount)
        .sum()
}

fn merge_categories(summary: &MonthlyCategoryTotals, period: &Period) -> BTreeMap<String, Money> {
    let mut merged: BTreeMap<String, Money> = BTreeMap::new();
    for (_, categories) in summary
        .iter()
        .filter(|(month, _)| period.covers_month_key(month))
    {
        for (category, amount) in categories {
            *merged.entry(category.clone()).or_default() += *amount;
        }
    }
    merged
}

fn sort_descending(totals: BTreeMap<String, Money>) -> Vec<(String, Money)> {
    let mut rows: Vec<_> = totals.into_iter().collect();
    // Stable sort keeps ties in category order
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}
