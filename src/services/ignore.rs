//! Ignore registry
//!
//! The set of (date, store) pairs excluded from aggregation. Membership here
//! decides which partition a transaction lives in. Entries keep insertion
//! order so the persisted file reads chronologically by when the user
//! ignored them.

use tracing::debug;

use crate::error::TrackerResult;
use crate::models::{IgnoreKey, Transaction};
use crate::storage::IgnorePersistence;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgnoreRegistry {
    entries: Vec<IgnoreKey>,
}

impl IgnoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, dropping duplicate pairs
    pub fn from_entries(entries: impl IntoIterator<Item = IgnoreKey>) -> Self {
        let mut registry = Self::new();
        for key in entries {
            registry.add(key);
        }
        registry
    }

    pub fn load(io: &dyn IgnorePersistence) -> TrackerResult<Self> {
        Ok(Self::from_entries(io.load_ignore_list()?))
    }

    /// Replace the in-memory entries with the persisted ones
    pub fn reload(&mut self, io: &dyn IgnorePersistence) -> TrackerResult<()> {
        *self = Self::load(io)?;
        debug!(count = self.entries.len(), "reloaded ignore registry");
        Ok(())
    }

    pub fn save(&self, io: &dyn IgnorePersistence) -> TrackerResult<()> {
        io.save_ignore_list(&self.entries)
    }

    pub fn contains(&self, key: &IgnoreKey) -> bool {
        self.entries.contains(key)
    }

    /// Check whether a transaction's (date, store) pair is ignored
    pub fn is_ignored(&self, txn: &Transaction) -> bool {
        self.entries.iter().any(|key| key.matches(txn))
    }

    /// Add a pair; returns false when it was already present
    pub fn add(&mut self, key: IgnoreKey) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.entries.push(key);
        true
    }

    /// Remove a pair; returns false when it was absent
    pub fn remove(&mut self, key: &IgnoreKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != key);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[IgnoreKey] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
