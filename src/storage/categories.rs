//! Category map repository
//!
//! Persists the store-to-category map as a headerless `store,category` CSV.

use std::path::PathBuf;

use tracing::debug;

use crate::error::TrackerError;

use super::file_io::{read_csv_pairs, write_csv_pairs_atomic};
use super::{CategoryMap, CategoryPersistence};

/// Repository for the store-to-category map
pub struct CategoryRepository {
    path: PathBuf,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CategoryPersistence for CategoryRepository {
    fn load_categories(&self) -> Result<CategoryMap, TrackerError> {
        // Later rows win when a store appears twice
        let categories: CategoryMap = read_csv_pairs(&self.path, false)?.into_iter().collect();
        debug!(count = categories.len(), path = %self.path.display(), "loaded categories");
        Ok(categories)
    }

    fn save_categories(&self, categories: &CategoryMap) -> Result<(), TrackerError> {
        write_csv_pairs_atomic(
            &self.path,
            None,
            categories
                .iter()
                .map(|(store, category)| (store.as_str(), category.as_str())),
        )?;
        debug!(count = categories.len(), path = %self.path.display(), "saved categories");
        Ok(())
    }
}
