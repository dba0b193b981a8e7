//! Ignore list repository
//!
//! Persists ignored (date, store) pairs as a headerless `date,store` CSV with
//! dates in "YYYY-MM-DD" form.

use std::path::PathBuf;

use tracing::debug;

use crate::error::TrackerError;
use crate::models::IgnoreKey;

use super::file_io::{read_csv_pairs, write_csv_pairs_atomic};
use super::IgnorePersistence;

/// Repository for the ignore list
pub struct IgnoreRepository {
    path: PathBuf,
}

impl IgnoreRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl IgnorePersistence for IgnoreRepository {
    fn load_ignore_list(&self) -> Result<Vec<IgnoreKey>, TrackerError> {
        let entries: Vec<IgnoreKey> = read_csv_pairs(&self.path, false)?
            .into_iter()
            .map(|(date, store)| IgnoreKey::new(date.trim(), store.trim()))
            .collect();
        debug!(count = entries.len(), path = %self.path.display(), "loaded ignore list");
        Ok(entries)
    }

    fn save_ignore_list(&self, entries: &[IgnoreKey]) -> Result<(), TrackerError> {
        write_csv_pairs_atomic(
            &self.path,
            None,
            entries
                .iter()
                .map(|key| (key.date.as_str(), key.store.as_str())),
        )?;
        debug!(count = entries.len(), path = %self.path.display(), "saved ignore list");
        Ok(())
    }
}
