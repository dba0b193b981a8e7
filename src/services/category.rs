//! Category directory
//!
//! Maps every store seen in an import to a category label. Stores that have
//! not been classified yet map to the [`UNCLASSIFIED`] sentinel.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::UNCLASSIFIED;
use crate::storage::{CategoryMap, CategoryPersistence};

/// Validate and normalize a category label supplied by the user
pub fn validate_category_name(name: &str) -> TrackerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::Validation("Category name cannot be empty".into()));
    }
    Ok(name.to_string())
}

/// In-memory store-to-category directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDirectory {
    categories: CategoryMap,
}

impl CategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(categories: CategoryMap) -> Self {
        Self { categories }
    }

    /// Load the directory from persistence
    pub fn load(io: &dyn CategoryPersistence) -> TrackerResult<Self> {
        Ok(Self::from_map(io.load_categories()?))
    }

    /// Persist the whole directory
    pub fn save(&self, io: &dyn CategoryPersistence) -> TrackerResult<()> {
        io.save_categories(&self.categories)
    }

    /// Category for a store, or the sentinel when the store is unseen
    pub fn category_for(&self, store: &str) -> &str {
        self.categories
            .get(store)
            .map(String::as_str)
            .unwrap_or(UNCLASSIFIED)
    }

    pub fn contains(&self, store: &str) -> bool {
        self.categories.contains_key(store)
    }

    /// Record an unseen store as unclassified. Returns true when inserted.
    pub fn ensure_known(&mut self, store: &str) -> bool {
        if self.categories.contains_key(store) {
            return false;
        }
        self.categories
            .insert(store.to_string(), UNCLASSIFIED.to_string());
        true
    }

    /// Upsert a mapping without persisting it
    pub fn set(&mut self, store: &str, category: &str) {
        self.categories
            .insert(store.to_string(), category.to_string());
    }

    /// Upsert a mapping and persist the directory immediately
    ///
    /// The in-memory mapping is kept even when the write fails.
    pub fn assign(
        &mut self,
        store: &str,
        category: &str,
        io: &dyn CategoryPersistence,
    ) -> TrackerResult<String> {
        if store.trim().is_empty() {
            return Err(TrackerError::Validation("Store name cannot be empty".into()));
        }
        let category = validate_category_name(category)?;

        self.set(store, &category);
        debug!(store, category = %category, "assigned category");
        self.save(io)?;
        Ok(category)
    }

    /// Remap every store whose category equals `old` (case-insensitive) to `new`.
    ///
    /// Only updates memory; returns the number of stores remapped.
    pub fn rename(&mut self, old: &str, new: &str) -> usize {
        let old_lower = old.to_lowercase();
        let mut renamed = 0;
        for category in self.categories.values_mut() {
            if category.to_lowercase() == old_lower {
                *category = new.to_string();
                renamed += 1;
            }
        }
        renamed
    }

    /// Stores still awaiting classification, sorted
    pub fn unclassified_stores(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, category)| category.as_str() == UNCLASSIFIED)
            .map(|(store, _)| store.as_str())
            .collect()
    }

    /// Distinct real categories, sorted
    pub fn known_categories(&self) -> Vec<&str> {
        self.categories
            .values()
            .filter(|category| category.as_str() != UNCLASSIFIED)
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn snapshot(&self) -> &CategoryMap {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
