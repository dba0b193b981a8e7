//! CLI command handlers
//!
//! Bridges the clap argument parsing with the tracker engine. Each command
//! opens the tracker on the data directory (restoring the last session);
//! commands that change the loaded transactions save the session again.

pub mod category;
pub mod export;
pub mod report;
pub mod settings;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use transaction::{handle_load_command, handle_transaction_command, TransactionCommands};

use tracing::debug;

use crate::error::TrackerResult;
use crate::services::Tracker;
use crate::storage::Storage;

/// Persist both partitions for the next invocation
pub(crate) fn save_session(storage: &Storage, tracker: &Tracker) -> TrackerResult<()> {
    let session = tracker.session_data();
    debug!(
        active = session.active.len(),
        ignored = session.ignored.len(),
        "saving session"
    );
    storage.session.save(&session)
}
