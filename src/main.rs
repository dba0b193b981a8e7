use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use statement_tracker::audit::AuditLogger;
use statement_tracker::cli::{
    handle_category_command, handle_export_command, handle_load_command, handle_report_command,
    handle_settings_command, handle_transaction_command, CategoryCommands, ExportArgs,
    ReportCommands, SettingsCommands, TransactionCommands,
};
use statement_tracker::config::paths::DATA_DIR_ENV;
use statement_tracker::config::TrackerPaths;
use statement_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "statement",
    version,
    about = "Categorize bank statement exports and track monthly income and spending",
    long_about = "Loads bank statement CSV exports (Date, Description, Value), \
                  classifies each transaction by store, and keeps monthly and \
                  yearly income and spending summaries up to date as categories \
                  are corrected and transactions are ignored."
)]
struct Cli {
    /// Data directory (overrides the STATEMENT_TRACKER_DATA_DIR variable)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load statement CSV files
    Load {
        /// Statement files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Append to the loaded transactions instead of replacing them
        #[arg(short, long)]
        merge: bool,
    },

    /// Transaction listing, corrections and the ignore list
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Store categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Summaries and analysis
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the monthly summary
    Export(ExportArgs),

    /// Presentation settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Forget the loaded transactions (categories and ignore list are kept)
    Reset,

    /// Show data file locations
    Config,
}

fn init_tracing(verbose: bool) {
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Load { files, merge }) => {
            handle_load_command(&storage, files, merge)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&paths, cmd)?;
        }
        Some(Commands::History { limit }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Reset) => {
            storage.session.clear()?;
            println!("Loaded transactions cleared.");
        }
        Some(Commands::Config) => {
            println!("Statement tracker configuration");
            println!("===============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("  (set {} or --data-dir to change)", DATA_DIR_ENV);
            println!("Categories:     {}", paths.categories_file().display());
            println!("Ignore list:    {}", paths.ignore_file().display());
            println!("Settings:       {}", paths.settings_file().display());
            println!("Session:        {}", paths.session_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
        }
        None => {
            println!("statement - bank statement tracker");
            println!();
            println!("Run 'statement --help' for usage information.");
            println!("Run 'statement load <FILE>...' to get started.");
        }
    }

    Ok(())
}
