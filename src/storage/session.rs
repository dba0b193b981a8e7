//! Session snapshot repository
//!
//! The loaded transactions only live in memory while a command runs. Between
//! command invocations both partitions are kept in session.json so that
//! later commands can query and edit what an earlier `load` imported.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::Transaction;

use super::file_io::{read_json, write_json_atomic};

/// Serializable snapshot of both partitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub active: Vec<Transaction>,
    #[serde(default)]
    pub ignored: Vec<Transaction>,
}

/// Repository for the session snapshot
pub struct SessionRepository {
    path: PathBuf,
}

impl SessionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the snapshot, empty when no session has been saved yet
    pub fn load(&self) -> Result<SessionData, TrackerError> {
        read_json(&self.path)
    }

    pub fn save(&self, data: &SessionData) -> Result<(), TrackerError> {
        write_json_atomic(&self.path, data)
    }

    /// Forget the session entirely
    pub fn clear(&self) -> Result<(), TrackerError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                TrackerError::Storage(format!("Failed to remove session file: {}", e))
            })?;
        }
        Ok(())
    }
}
