//! Transaction model
//!
//! A transaction is one imported statement line after store extraction and
//! category resolution. Records are treated as immutable except for their
//! category, which user corrections rewrite in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Category given to stores the user has not classified yet
pub const UNCLASSIFIED: &str = "None";

/// Date format used for ignore keys and listings
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used by the bank statement exports ("15 Jan 2024")
pub const STATEMENT_DATE_FORMAT: &str = "%d %b %Y";

/// A single statement transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Posting date
    pub date: NaiveDate,

    /// Canonical store name (see [`extract_store_name`](super::store::extract_store_name))
    pub store: String,

    /// Signed amount (negative = outgoing)
    pub amount: Money,

    /// Category label, [`UNCLASSIFIED`] until the store is classified
    pub category: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        store: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            store: store.into(),
            amount,
            category: category.into(),
        }
    }

    /// Date rendered as "YYYY-MM-DD", the form used by the ignore list
    pub fn date_key(&self) -> String {
        self.date.format(ISO_DATE_FORMAT).to_string()
    }

    /// Month bucket "YYYY-MM"
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Year bucket "YYYY"
    pub fn year_key(&self) -> String {
        self.date.format("%Y").to_string()
    }

    /// Check if this transaction is outgoing money
    pub fn is_outgoing(&self) -> bool {
        self.amount.is_negative()
    }

    /// Check if this transaction is income
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if the category is still the unclassified sentinel
    pub fn is_unclassified(&self) -> bool {
        self.category == UNCLASSIFIED
    }

    /// Income portion for tabular display (zero for outgoing)
    pub fn income(&self) -> Money {
        if self.is_income() {
            self.amount
        } else {
            Money::zero()
        }
    }

    /// Outgoing portion as a positive amount (zero for income)
    pub fn outgoing(&self) -> Money {
        if self.is_outgoing() {
            self.amount.abs()
        } else {
            Money::zero()
        }
    }
}

/// Identity of an ignored transaction: its "YYYY-MM-DD" date and store name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IgnoreKey {
    pub date: String,
    pub store: String,
}

impl IgnoreKey {
    pub fn new(date: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            store: store.into(),
        }
    }

    /// Key under which a transaction would be ignored
    pub fn for_transaction(txn: &Transaction) -> Self {
        Self::new(txn.date_key(), txn.store.clone())
    }

    /// Check if a transaction carries this (date, store) pair
    pub fn matches(&self, txn: &Transaction) -> bool {
        txn.store == self.store && txn.date_key() == self.date
    }
}

impl fmt::Display for IgnoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.store)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date_key(),
            self.store,
            self.amount,
            self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Tesco",
            Money::from_pence(amount),
            UNCLASSIFIED,
        )
    }

    #[test]
    fn test_keys() {
        let txn = sample(-2350);
        assert_eq!(txn.date_key(), "2024-01-15");
        assert_eq!(txn.month_key(), "2024-01");
        assert_eq!(txn.year_key(), "2024");
    }

    #[test]
    fn test_direction() {
        let spend = sample(-2350);
        assert!(spend.is_outgoing());
        assert_eq!(spend.outgoing().pence(), 2350);
        assert!(spend.income().is_zero());

        let zero = sample(0);
        assert!(!zero.is_outgoing());
        assert!(!zero.is_income());
    }

    #[test]
    fn test_unclassified() {
        let mut txn = sample(-100);
        assert!(txn.is_unclassified());
        txn.category = "Groceries".into();
        assert!(!txn.is_unclassified());
    }

    #[test]
    fn test_ignore_key_matches() {
        let txn = sample(-2350);
        let key = IgnoreKey::for_transaction(&txn);
        assert_eq!(key, IgnoreKey::new("2024-01-15", "Tesco"));
        assert!(key.matches(&txn));
        assert!(!IgnoreKey::new("2024-01-16", "Tesco").matches(&txn));
        assert!(!IgnoreKey::new("2024-01-15", "tesco").matches(&txn));
    }

    #[test]
    fn test_display() {
        assert_eq!(sample(-2350).to_string(), "2024-01-15 Tesco -£23.50 [None]");
    }
}
