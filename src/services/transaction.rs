//! Transaction store
//!
//! The authoritative collection of loaded transactions, split into an
//! `active` partition (feeds the aggregates) and an `ignored` partition.
//! Every transaction lives in exactly one partition, and it is in `ignored`
//! exactly when its (date, store) pair is in the [`IgnoreRegistry`].
//!
//! Lookups that find nothing are not errors: the mutating operations return
//! how many records they touched and leave everything unchanged on a miss.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{IgnoreKey, Period, Transaction, UNCLASSIFIED};
use crate::storage::SessionData;

use super::ignore::IgnoreRegistry;

/// Which partition a transaction lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Active,
    Ignored,
}

/// Query filter for transaction snapshots
///
/// Category and store filters are case-insensitive substring matches.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub period: Period,
    pub category: Option<String>,
    pub store: Option<String>,
}

impl TransactionFilter {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.period.contains(txn.date) {
            return false;
        }
        if let Some(needle) = non_empty_lower(&self.category) {
            if !txn.category.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(needle) = non_empty_lower(&self.store) {
            if !txn.store.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

fn non_empty_lower(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Partitioned transaction collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    active: Vec<Transaction>,
    ignored: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore both partitions from a session snapshot, as saved
    pub fn from_session(data: SessionData) -> Self {
        Self {
            active: data.active,
            ignored: data.ignored,
        }
    }

    pub fn to_session(&self) -> SessionData {
        SessionData {
            active: self.active.clone(),
            ignored: self.ignored.clone(),
        }
    }

    /// Route a transaction into the partition its ignore status calls for
    pub fn import_transaction(&mut self, txn: Transaction, registry: &IgnoreRegistry) -> Partition {
        if registry.is_ignored(&txn) {
            self.ignored.push(txn);
            Partition::Ignored
        } else {
            self.active.push(txn);
            Partition::Active
        }
    }

    /// Clear both partitions, then import
    pub fn replace_all(
        &mut self,
        transactions: impl IntoIterator<Item = Transaction>,
        registry: &IgnoreRegistry,
    ) {
        self.clear();
        self.append_all(transactions, registry);
    }

    /// Import without touching what is already loaded
    pub fn append_all(
        &mut self,
        transactions: impl IntoIterator<Item = Transaction>,
        registry: &IgnoreRegistry,
    ) {
        for txn in transactions {
            self.import_transaction(txn, registry);
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.ignored.clear();
    }

    /// Move every active transaction with this (date, store) pair to
    /// `ignored` and register the pair. Returns how many moved; on a miss
    /// the registry is left alone.
    pub fn move_to_ignored(&mut self, key: &IgnoreKey, registry: &mut IgnoreRegistry) -> usize {
        let (moved, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|txn| key.matches(txn));
        self.active = kept;

        let count = moved.len();
        if count > 0 {
            self.ignored.extend(moved);
            registry.add(key.clone());
        }
        debug!(key = %key, moved = count, "move to ignored");
        count
    }

    /// Inverse of [`move_to_ignored`](Self::move_to_ignored). The pair is
    /// always dropped from the registry, even when nothing was ignored
    /// under it.
    pub fn move_to_active(&mut self, key: &IgnoreKey, registry: &mut IgnoreRegistry) -> usize {
        registry.remove(key);

        let (moved, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.ignored)
            .into_iter()
            .partition(|txn| key.matches(txn));
        self.ignored = kept;

        let count = moved.len();
        self.active.extend(moved);
        debug!(key = %key, moved = count, "move to active");
        count
    }

    /// Re-route both partitions against a (freshly reloaded) registry.
    /// Relative order inside each partition is preserved.
    pub fn refilter(&mut self, registry: &IgnoreRegistry) -> usize {
        let (to_ignore, active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|txn| registry.is_ignored(txn));
        let (still_ignored, to_activate): (Vec<_>, Vec<_>) = std::mem::take(&mut self.ignored)
            .into_iter()
            .partition(|txn| registry.is_ignored(txn));

        let changed = to_ignore.len() + to_activate.len();
        self.active = active;
        self.active.extend(to_activate);
        self.ignored = still_ignored;
        self.ignored.extend(to_ignore);
        changed
    }

    /// Set the category of one active transaction by position.
    /// Returns the previous category, or None when the index is stale.
    pub fn update_category_at(&mut self, index: usize, category: &str) -> Option<String> {
        let txn = self.active.get_mut(index)?;
        Some(std::mem::replace(&mut txn.category, category.to_string()))
    }

    /// Set the category of every active transaction for a store
    pub fn update_category_for_store(&mut self, store: &str, category: &str) -> usize {
        let mut updated = 0;
        for txn in self.active.iter_mut().filter(|txn| txn.store == store) {
            txn.category = category.to_string();
            updated += 1;
        }
        updated
    }

    /// Rename a category (case-insensitive match) in both partitions
    pub fn rename_category(&mut self, old: &str, new: &str) -> usize {
        let old_lower = old.to_lowercase();
        let mut renamed = 0;
        for txn in self.active.iter_mut().chain(self.ignored.iter_mut()) {
            if txn.category.to_lowercase() == old_lower {
                txn.category = new.to_string();
                renamed += 1;
            }
        }
        renamed
    }

    /// Give a category to a store's transactions still marked unclassified
    pub fn classify_store(&mut self, store: &str, category: &str) -> usize {
        let mut updated = 0;
        for txn in self
            .active
            .iter_mut()
            .chain(self.ignored.iter_mut())
            .filter(|txn| txn.store == store && txn.category == UNCLASSIFIED)
        {
            txn.category = category.to_string();
            updated += 1;
        }
        updated
    }

    pub fn active(&self) -> &[Transaction] {
        &self.active
    }

    pub fn ignored(&self) -> &[Transaction] {
        &self.ignored
    }

    pub fn partition(&self, partition: Partition) -> &[Transaction] {
        match partition {
            Partition::Active => &self.active,
            Partition::Ignored => &self.ignored,
        }
    }

    /// Filtered snapshot of one partition, paired with partition positions
    pub fn filtered(
        &self,
        partition: Partition,
        filter: &TransactionFilter,
    ) -> Vec<(usize, &Transaction)> {
        self.partition(partition)
            .iter()
            .enumerate()
            .filter(|(_, txn)| filter.matches(txn))
            .collect()
    }

    /// "Total" followed by every year and month present, sorted
    pub fn available_periods(&self) -> Vec<String> {
        let keys: BTreeSet<String> = self
            .active
            .iter()
            .chain(self.ignored.iter())
            .flat_map(|txn| [txn.year_key(), txn.month_key()])
            .collect();

        std::iter::once(Period::Total.to_string())
            .chain(keys)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.ignored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.ignored.is_empty()
    }
}
