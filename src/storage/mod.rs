//! Storage layer for the statement tracker
//!
//! The engine only talks to persistence through two narrow traits, one for
//! the store-to-category map and one for the ignore list. The CSV-backed
//! repositories here implement them; tests can substitute their own.

pub mod categories;
pub mod file_io;
pub mod ignore;
pub mod session;

use std::collections::BTreeMap;

pub use categories::CategoryRepository;
pub use file_io::{read_csv_pairs, read_json, write_csv_pairs_atomic, write_json_atomic};
pub use ignore::IgnoreRepository;
pub use session::{SessionData, SessionRepository};

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::IgnoreKey;

/// Store name to category label
pub type CategoryMap = BTreeMap<String, String>;

/// Load/save access to the persisted category map
pub trait CategoryPersistence {
    fn load_categories(&self) -> Result<CategoryMap, TrackerError>;
    fn save_categories(&self, categories: &CategoryMap) -> Result<(), TrackerError>;
}

/// Load/save access to the persisted ignore list
pub trait IgnorePersistence {
    fn load_ignore_list(&self) -> Result<Vec<IgnoreKey>, TrackerError>;
    fn save_ignore_list(&self, entries: &[IgnoreKey]) -> Result<(), TrackerError>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub categories: CategoryRepository,
    pub ignore: IgnoreRepository,
    pub session: SessionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            ignore: IgnoreRepository::new(paths.ignore_file()),
            session: SessionRepository::new(paths.session_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }
}
