//! Display formatting for terminal output
//!
//! Tabular views are rendered with `tabled`; the text reports format
//! themselves (see [`crate::reports`]).

pub mod category;
pub mod report;
pub mod transaction;

pub use category::{format_category_stats, format_directory, format_known_categories};
pub use report::{format_breakdown, format_ignore_list, format_periods, format_settings, format_store_totals};
pub use transaction::format_transaction_table;
