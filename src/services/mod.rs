//! Service layer for the statement tracker
//!
//! The engine components live here, leaves first: the category directory,
//! the ignore registry, the partitioned transaction store, the aggregation
//! engine and the import pipeline. [`Tracker`] ties them together.

pub mod aggregation;
pub mod category;
pub mod ignore;
pub mod import;
pub mod tracker;
pub mod transaction;

pub use aggregation::{Aggregates, MonthlyCategoryTotals, MonthlyTotals, PeriodBreakdown};
pub use category::{validate_category_name, CategoryDirectory};
pub use ignore::IgnoreRegistry;
pub use import::{FileError, ImportPipeline, ImportReport, LoadMode, RowError, RowErrorReason};
pub use tracker::{RenameOutcome, Tracker};
pub use transaction::{Partition, TransactionFilter, TransactionStore};
