//! Category statistics over the active partition

use std::collections::BTreeMap;

use crate::models::{Money, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    /// Signed sum of amounts
    pub total: Money,
    pub average: Money,
}

/// Count, signed total and average per category, sorted by category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStatsReport {
    pub rows: Vec<CategoryStats>,
}

impl CategoryStatsReport {
    pub fn generate(active: &[Transaction]) -> Self {
        let mut totals: BTreeMap<&str, (usize, Money)> = BTreeMap::new();
        for txn in active {
            let entry = totals.entry(txn.category.as_str()).or_default();
            entry.0 += 1;
            entry.1 += txn.amount;
        }

        let rows = totals
            .into_iter()
            .map(|(category, (count, total))| CategoryStats {
                category: category.to_string(),
                count,
                total,
                average: Money::from_pence(
                    (total.pence() as f64 / count as f64).round() as i64,
                ),
            })
            .collect();

        Self { rows }
    }

    /// Sort by signed total, most negative (largest spend) first
    pub fn sort_by_total(&mut self) {
        self.rows.sort_by(|a, b| a.total.cmp(&b.total));
    }

    /// Sort by number of transactions, most first
    pub fn sort_by_count(&mut self) {
        self.rows.sort_by(|a, b| b.count.cmp(&a.count));
    }
}
