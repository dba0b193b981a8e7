//! Path management for the statement tracker
//!
//! Provides XDG-compliant path resolution for the persisted category map,
//! ignore list, settings, session snapshot and audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `STATEMENT_TRACKER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/statement-tracker` or `~/.config/statement-tracker`
//! 3. Windows: `%APPDATA%\statement-tracker`

use std::path::PathBuf;

use crate::error::TrackerError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "STATEMENT_TRACKER_DATA_DIR";

/// Manages all paths used by the statement tracker
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    /// Base directory for all persisted files
    base_dir: PathBuf,
}

impl TrackerPaths {
    /// Create a new TrackerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home/config directory
    /// can be determined.
    pub fn new() -> Result<Self, TrackerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create TrackerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Store-to-category map (`store,category`, no header)
    pub fn categories_file(&self) -> PathBuf {
        self.base_dir.join("categories.csv")
    }

    /// Ignored (date, store) pairs (`date,store`, no header)
    pub fn ignore_file(&self) -> PathBuf {
        self.base_dir.join("ignore.csv")
    }

    /// Presentation settings (`Setting,Value` with header)
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.csv")
    }

    /// Snapshot of the loaded transactions between runs
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), TrackerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrackerError::Io(format!("Failed to create data directory: {}", e)))?;
        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TrackerError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                TrackerError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("statement-tracker"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TrackerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TrackerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("statement-tracker"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(
            paths.categories_file(),
            temp_dir.path().join("categories.csv")
        );
        assert_eq!(paths.ignore_file(), temp_dir.path().join("ignore.csv"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("settings.csv"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("tracker");
        let paths = TrackerPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.exists());
    }
}
