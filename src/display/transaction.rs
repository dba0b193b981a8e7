//! Transaction table formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Outgoing")]
    outgoing: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format (position, transaction) pairs as a table with totals underneath
pub fn format_transaction_table(rows: &[(usize, &Transaction)]) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let table_rows = rows.iter().map(|(index, txn)| TransactionRow {
        index: *index,
        date: txn.date_key(),
        store: txn.store.clone(),
        income: blank_if_zero(txn.income()),
        outgoing: blank_if_zero(txn.outgoing()),
        category: txn.category.clone(),
    });

    let income: Money = rows.iter().map(|(_, t)| t.income()).sum();
    let outgoing: Money = rows.iter().map(|(_, t)| t.outgoing()).sum();

    let mut output = Table::new(table_rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format!(
        "{} transactions  Income {}  Outgoing {}  Net {}\n",
        rows.len(),
        income,
        outgoing,
        income - outgoing
    ));
    output
}

fn blank_if_zero(amount: Money) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_transaction_table() {
        let spend = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Tesco",
            Money::from_pence(-2350),
            "Groceries",
        );
        let income = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            "Employer",
            Money::from_pence(200000),
            "None",
        );

        let output = format_transaction_table(&[(0, &spend), (3, &income)]);
        assert!(output.contains("2024-01-15"));
        assert!(output.contains("Tesco"));
        assert!(output.contains("£23.50"));
        assert!(output.contains("2 transactions"));
        assert!(output.contains("Net £1976.50"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[]), "No transactions found.\n");
    }
}
