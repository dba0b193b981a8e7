//! Statement tracker - categorize bank statement exports
//!
//! Loads bank statement CSV files, classifies each transaction by store into
//! a user-defined category, and keeps monthly and yearly income and spending
//! aggregates consistent while categories are corrected and transactions are
//! ignored or restored.
//!
//! # Architecture
//!
//! - `config`: data directory resolution and presentation settings
//! - `error`: crate error type
//! - `models`: money, transactions, periods and store name extraction
//! - `storage`: CSV/JSON persistence behind narrow traits
//! - `services`: the engine (directory, ignore registry, transaction store,
//!   aggregation, import) and the [`Tracker`](services::Tracker) facade
//! - `reports`, `export`, `display`: read-only views of the engine state
//! - `audit`: JSONL trail of user mutations
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use statement_tracker::config::TrackerPaths;
//! use statement_tracker::services::{LoadMode, Tracker};
//! use statement_tracker::storage::Storage;
//!
//! let storage = Storage::new(TrackerPaths::new()?)?;
//! let mut tracker = Tracker::from_storage(&storage)?;
//! tracker.import(&["statement.csv"], LoadMode::Replace)?;
//! tracker.move_to_ignore("2024-01-15", "Tesco")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
