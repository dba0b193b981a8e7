//! Category directory and statistics formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::reports::CategoryStatsReport;
use crate::services::CategoryDirectory;

#[derive(Tabled)]
struct DirectoryRow<'a> {
    #[tabled(rename = "Store")]
    store: &'a str,
    #[tabled(rename = "Category")]
    category: &'a str,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Net Total")]
    total: String,
    #[tabled(rename = "Average")]
    average: String,
}

/// Format the store-to-category directory, optionally only unclassified stores
pub fn format_directory(directory: &CategoryDirectory, unclassified_only: bool) -> String {
    let rows: Vec<DirectoryRow> = if unclassified_only {
        directory
            .unclassified_stores()
            .into_iter()
            .map(|store| DirectoryRow {
                store,
                category: directory.category_for(store),
            })
            .collect()
    } else {
        directory
            .snapshot()
            .iter()
            .map(|(store, category)| DirectoryRow {
                store,
                category,
            })
            .collect()
    };

    if rows.is_empty() {
        return if unclassified_only {
            "All stores are classified.\n".to_string()
        } else {
            "No stores known yet.\n".to_string()
        };
    }

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// One category per line
pub fn format_known_categories(categories: &[&str]) -> String {
    if categories.is_empty() {
        return "No categories assigned yet.\n".to_string();
    }
    let mut output = String::new();
    for category in categories {
        output.push_str(category);
        output.push('\n');
    }
    output
}

pub fn format_category_stats(report: &CategoryStatsReport) -> String {
    if report.rows.is_empty() {
        return "No transactions loaded.\n".to_string();
    }

    let rows = report.rows.iter().map(|row| StatsRow {
        category: row.category.clone(),
        count: row.count,
        total: row.total.to_string(),
        average: row.average.to_string(),
    });
    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use chrono::NaiveDate;

    #[test]
    fn test_format_directory() {
        let mut directory = CategoryDirectory::new();
        directory.set("Tesco", "Groceries");
        directory.ensure_known("Mystery");

        let all = format_directory(&directory, false);
        assert!(all.contains("Tesco"));
        assert!(all.contains("Mystery"));

        let unclassified = format_directory(&directory, true);
        assert!(unclassified.contains("Mystery"));
        assert!(!unclassified.contains("Tesco"));

        directory.set("Mystery", "Other");
        assert_eq!(format_directory(&directory, true), "All stores are classified.\n");
    }

    #[test]
    fn test_format_category_stats() {
        let report = CategoryStatsReport::generate(&[Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Tesco",
            Money::from_pence(-2350),
            "Groceries",
        )]);
        let output = format_category_stats(&report);
        assert!(output.contains("Net Total"));
        assert!(output.contains("-£23.50"));
    }

    #[test]
    fn test_format_known_categories() {
        assert_eq!(format_known_categories(&["Food", "Fuel"]), "Food\nFuel\n");
        assert_eq!(format_known_categories(&[]), "No categories assigned yet.\n");
    }
}
