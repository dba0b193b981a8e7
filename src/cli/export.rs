//! CLI command for exporting the aggregates

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_summary, ExportFormat};
use crate::services::Tracker;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    /// CSV: Month,Type,Category,Amount
    Csv,
    /// JSON with monthly totals
    Json,
    /// YAML with monthly totals
    Yaml,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Yaml => ExportFormat::Yaml,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormatArg,
}

/// Handle `export`
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> TrackerResult<()> {
    let tracker = Tracker::from_storage(storage)?;
    let format = ExportFormat::from(args.format);

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export_summary(tracker.aggregates(), format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| TrackerError::Export(e.to_string()))?;
            println!("Summary exported to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export_summary(tracker.aggregates(), format, &mut handle)?;
        }
    }

    Ok(())
}
