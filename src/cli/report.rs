//! Report CLI commands

use clap::Subcommand;

use crate::display::{format_breakdown, format_periods, format_store_totals};
use crate::error::TrackerResult;
use crate::models::Period;
use crate::reports::{FinancialAnalysis, MonthlySummaryReport, StoreTotalsReport};
use crate::services::Tracker;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly income, spending and category breakdowns
    Summary {
        /// Restrict to a period: Total, YYYY or YYYY-MM
        #[arg(short, long, default_value = "Total")]
        period: Period,
    },

    /// Averages and month-over-month trends
    Analysis,

    /// Category totals for one period
    Breakdown {
        /// Total, YYYY or YYYY-MM
        #[arg(default_value = "Total")]
        period: Period,
    },

    /// Income and outgoing per store
    Stores {
        /// Store substring (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Periods with loaded data
    Periods,
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> TrackerResult<()> {
    let tracker = Tracker::from_storage(storage)?;

    match cmd {
        ReportCommands::Summary { period } => {
            let report = MonthlySummaryReport::generate(tracker.aggregates(), &period);
            print!("{}", report.format_terminal());
        }

        ReportCommands::Analysis => {
            let analysis = FinancialAnalysis::generate(tracker.aggregates());
            print!("{}", analysis.format_terminal());
        }

        ReportCommands::Breakdown { period } => {
            print!("{}", format_breakdown(&tracker.breakdown(&period)));
        }

        ReportCommands::Stores { filter } => {
            let mut report = StoreTotalsReport::generate(tracker.transactions().active());
            if let Some(needle) = filter {
                report = report.filter(&needle);
            }
            print!("{}", format_store_totals(&report));
        }

        ReportCommands::Periods => {
            print!("{}", format_periods(&tracker.available_periods()));
        }
    }

    Ok(())
}
