//! Configuration module for the statement tracker
//!
//! - data directory resolution and file locations
//! - presentation settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{Settings, Theme};
