//! User settings for the statement tracker
//!
//! Presentation preferences persisted as a two-column `Setting,Value` CSV
//! with a header row. Keys this crate does not know about are kept and
//! written back untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::storage::file_io::{read_csv_pairs, write_csv_pairs_atomic};

const SETTINGS_HEADER: [&str; 2] = ["Setting", "Value"];

const THEME_KEY: &str = "Theme";
const FONT_FAMILY_KEY: &str = "FontFamily";
const FONT_SIZE_KEY: &str = "FontSize";
const HEADING_FONT_SIZE_KEY: &str = "hFontSize";

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(TrackerError::Validation(format!(
                "Unknown theme '{}': expected Light or Dark",
                other
            ))),
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub font_family: String,
    pub font_size: u32,
    /// Heading font size
    pub heading_font_size: u32,
    /// Unrecognized keys, preserved on save
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_family: "Arial".to_string(),
            font_size: 10,
            heading_font_size: 12,
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults when the file is missing
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            settings.save(paths)?;
            debug!(path = %settings_path.display(), "wrote default settings");
            return Ok(settings);
        }

        let mut settings = Settings::default();
        for (key, value) in read_csv_pairs(&settings_path, true)? {
            // A malformed value falls back to the default rather than failing the load
            if let Err(e) = settings.set(&key, &value) {
                debug!(key = %key, error = %e, "ignoring invalid setting");
            }
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let rows = self.rows();
        write_csv_pairs_atomic(
            paths.settings_file(),
            Some(SETTINGS_HEADER),
            rows.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    /// Update one setting by its file key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        let value = value.trim();
        match key {
            THEME_KEY => self.theme = value.parse()?,
            FONT_FAMILY_KEY => {
                if value.is_empty() {
                    return Err(TrackerError::Validation("Font family cannot be empty".into()));
                }
                self.font_family = value.to_string();
            }
            FONT_SIZE_KEY => self.font_size = parse_font_size(key, value)?,
            HEADING_FONT_SIZE_KEY => self.heading_font_size = parse_font_size(key, value)?,
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    /// All settings as (key, value) rows, known keys first
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            (THEME_KEY.to_string(), self.theme.to_string()),
            (FONT_FAMILY_KEY.to_string(), self.font_family.clone()),
            (FONT_SIZE_KEY.to_string(), self.font_size.to_string()),
            (HEADING_FONT_SIZE_KEY.to_string(), self.heading_font_size.to_string()),
        ];
        rows.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        rows
    }
}

fn parse_font_size(key: &str, value: &str) -> Result<u32, TrackerError> {
    match value.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(TrackerError::Validation(format!(
            "{} must be a positive whole number, got '{}'",
            key, value
        ))),
    }
}
