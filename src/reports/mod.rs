//! Reports over the loaded statements
//!
//! Monthly summaries and the financial analysis read the aggregate tables;
//! category statistics and store totals read the active partition directly.

pub mod analysis;
pub mod categories;
pub mod stores;
pub mod summary;

pub use analysis::{FinancialAnalysis, MonthTrend};
pub use categories::{CategoryStats, CategoryStatsReport};
pub use stores::{StoreTotals, StoreTotalsReport};
pub use summary::{MonthSummary, MonthlySummaryReport};
