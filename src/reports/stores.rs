//! Per-store income and outgoing totals over the active partition

use std::collections::HashMap;

use crate::models::{Money, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct StoreTotals {
    pub store: String,
    pub income: Money,
    /// Positive amount
    pub outgoing: Money,
}

/// Store totals, largest outgoing first
#[derive(Debug, Clone, PartialEq)]
pub struct StoreTotalsReport {
    pub rows: Vec<StoreTotals>,
}

impl StoreTotalsReport {
    pub fn generate(active: &[Transaction]) -> Self {
        let mut totals: HashMap<&str, (Money, Money)> = HashMap::new();
        for txn in active {
            let entry = totals.entry(txn.store.as_str()).or_default();
            entry.0 += txn.income();
            entry.1 += txn.outgoing();
        }

        let mut rows: Vec<StoreTotals> = totals
            .into_iter()
            .map(|(store, (income, outgoing))| StoreTotals {
                store: store.to_string(),
                income,
                outgoing,
            })
            .collect();
        rows.sort_by(|a, b| b.outgoing.cmp(&a.outgoing).then_with(|| a.store.cmp(&b.store)));

        Self { rows }
    }

    /// Only stores whose name contains `needle` (case-insensitive)
    pub fn filter(mut self, needle: &str) -> Self {
        let needle = needle.trim().to_lowercase();
        if !needle.is_empty() {
            self.rows.retain(|row| row.store.to_lowercase().contains(&needle));
        }
        self
    }
}
