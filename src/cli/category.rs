//! Category CLI commands

use clap::{Subcommand, ValueEnum};

use crate::display::{format_category_stats, format_directory, format_known_categories};
use crate::error::TrackerResult;
use crate::reports::CategoryStatsReport;
use crate::services::Tracker;
use crate::storage::Storage;

use super::save_session;

/// Sort order for category statistics
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatsOrder {
    Name,
    Total,
    Count,
}

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Show the store to category directory
    List,

    /// Show stores that still need a category
    Unclassified,

    /// List the distinct categories in use
    Known,

    /// Map a store to a category
    Assign {
        /// Store name
        store: String,
        /// Category
        category: String,
    },

    /// Rename a category everywhere (case-insensitive)
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Count, total and average per category over active transactions
    Stats {
        #[arg(short, long, value_enum, default_value = "name")]
        sort: StatsOrder,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TrackerResult<()> {
    let mut tracker = Tracker::from_storage(storage)?;

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_directory(tracker.directory(), false));
        }

        CategoryCommands::Unclassified => {
            print!("{}", format_directory(tracker.directory(), true));
        }

        CategoryCommands::Known => {
            print!("{}", format_known_categories(&tracker.directory().known_categories()));
        }

        CategoryCommands::Assign { store, category } => {
            let result = tracker.assign_category(&store, &category);
            save_session(storage, &tracker)?;
            let classified = result?;
            println!("Assigned {} to {}", store.trim(), category.trim());
            if classified > 0 {
                println!("  Classified {} loaded transaction(s)", classified);
            }
        }

        CategoryCommands::Rename { old, new } => {
            let result = tracker.rename_category(&old, &new);
            save_session(storage, &tracker)?;
            let outcome = result?;
            println!(
                "Renamed {} to {}: {} store(s), {} transaction(s)",
                old,
                new.trim(),
                outcome.stores,
                outcome.transactions
            );
        }

        CategoryCommands::Stats { sort } => {
            let mut report = CategoryStatsReport::generate(tracker.transactions().active());
            match sort {
                StatsOrder::Name => {}
                StatsOrder::Total => report.sort_by_total(),
                StatsOrder::Count => report.sort_by_count(),
            }
            print!("{}", format_category_stats(&report));
        }
    }

    Ok(())
}
