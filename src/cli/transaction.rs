//! Transaction CLI commands
//!
//! Loading statements, listing the active and ignored partitions, category
//! corrections, and moving transactions on and off the ignore list.

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::{format_ignore_list, format_transaction_table};
use crate::error::TrackerResult;
use crate::models::Period;
use crate::services::{ImportReport, LoadMode, Tracker, TransactionFilter};
use crate::storage::Storage;

use super::save_session;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List active transactions
    List {
        /// Period: Total, YYYY or YYYY-MM
        #[arg(short, long, default_value = "Total")]
        period: Period,
        /// Category substring (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Store substring (case-insensitive)
        #[arg(short, long)]
        store: Option<String>,
    },

    /// List ignored transactions
    Ignored {
        /// Period: Total, YYYY or YYYY-MM
        #[arg(short, long, default_value = "Total")]
        period: Period,
        /// Store substring (case-insensitive)
        #[arg(short, long)]
        store: Option<String>,
    },

    /// Change the category of the transaction at a list position
    Correct {
        /// Position shown by `txn list`
        index: usize,
        /// New category
        category: String,
        /// Apply to every transaction of the same store and remember it
        #[arg(short, long)]
        all: bool,
    },

    /// Ignore transactions by date and store
    Ignore {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Store name
        store: String,
    },

    /// Restore ignored transactions by date and store
    Unignore {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Store name
        store: String,
    },

    /// Show the persisted ignore list
    #[command(name = "ignore-list")]
    IgnoreList,

    /// Re-read the ignore list from disk and re-partition
    Refresh,
}

/// Handle `load`
pub fn handle_load_command(storage: &Storage, files: Vec<PathBuf>, merge: bool) -> TrackerResult<()> {
    let mut tracker = Tracker::from_storage(storage)?;
    let mode = if merge { LoadMode::Merge } else { LoadMode::Replace };

    let report = tracker.import(&files, mode)?;
    save_session(storage, &tracker)?;
    print_import_report(&report);
    Ok(())
}

fn print_import_report(report: &ImportReport) {
    println!(
        "Loaded {} transactions ({} active, {} ignored) from {} file(s)",
        report.total_loaded(),
        report.imported,
        report.ignored,
        report.files_processed
    );
    if !report.new_stores.is_empty() {
        println!("New stores awaiting a category: {}", report.new_stores.len());
    }
    if report.skipped_rows > 0 {
        println!("Skipped {} row(s) with unreadable amounts", report.skipped_rows);
    }
    for error in &report.row_errors {
        eprintln!("Skipped row {}", error);
    }
    for error in &report.file_errors {
        eprintln!("Could not read {}", error);
    }
    for error in &report.persistence_errors {
        eprintln!("Warning: {}", error);
    }
}

/// Handle a transaction command
pub fn handle_transaction_command(storage: &Storage, cmd: TransactionCommands) -> TrackerResult<()> {
    let mut tracker = Tracker::from_storage(storage)?;

    match cmd {
        TransactionCommands::List {
            period,
            category,
            store,
        } => {
            let filter = TransactionFilter {
                period,
                category,
                store,
            };
            print!("{}", format_transaction_table(&tracker.active(&filter)));
        }

        TransactionCommands::Ignored { period, store } => {
            let filter = TransactionFilter {
                period,
                category: None,
                store,
            };
            print!("{}", format_transaction_table(&tracker.ignored(&filter)));
        }

        TransactionCommands::Correct {
            index,
            category,
            all,
        } => {
            let result = tracker.correct_category(index, &category, all);
            save_session(storage, &tracker)?;
            match result? {
                0 => println!("No matching transaction at position {}", index),
                1 => println!("Updated 1 transaction"),
                n => println!("Updated {} transactions", n),
            }
        }

        TransactionCommands::Ignore { date, store } => {
            let result = tracker.move_to_ignore(&date, &store);
            save_session(storage, &tracker)?;
            match result? {
                0 => println!("No matching transaction for {} {}", date, store),
                n => println!("Ignored {} transaction(s) for {} {}", n, date, store),
            }
        }

        TransactionCommands::Unignore { date, store } => {
            let result = tracker.move_to_active(&date, &store);
            save_session(storage, &tracker)?;
            match result? {
                0 => println!("No ignored transaction for {} {}", date, store),
                n => println!("Restored {} transaction(s) for {} {}", n, date, store),
            }
        }

        TransactionCommands::IgnoreList => {
            print!("{}", format_ignore_list(tracker.registry().entries()));
        }

        TransactionCommands::Refresh => {
            let moved = tracker.refresh_ignore_list()?;
            save_session(storage, &tracker)?;
            println!("Re-partitioned {} transaction(s)", moved);
        }
    }

    Ok(())
}
