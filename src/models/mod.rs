//! Core data models for the statement tracker
//!
//! This module contains the value types shared by the engine: amounts,
//! transactions, reporting periods and store name extraction.

pub mod money;
pub mod period;
pub mod store;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use period::Period;
pub use store::extract_store_name;
pub use transaction::{IgnoreKey, Transaction, ISO_DATE_FORMAT, STATEMENT_DATE_FORMAT, UNCLASSIFIED};
