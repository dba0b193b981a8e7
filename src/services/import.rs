//! Statement import pipeline
//!
//! Reads bank statement CSV exports with a fixed `Date,Description,Value`
//! schema, turns each row into a [`Transaction`] and routes it into the
//! active or ignored partition. Problems are reported, never fatal:
//!
//! - a bad date skips the row and is reported as a [`RowError`]
//! - a bad amount skips the row quietly (counted in `skipped_rows`)
//! - an unreadable file is abandoned; later files still import

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::models::{extract_store_name, Money, Transaction, STATEMENT_DATE_FORMAT};
use crate::storage::CategoryPersistence;

use super::category::CategoryDirectory;
use super::ignore::IgnoreRegistry;
use super::transaction::{Partition, TransactionStore};

const DATE_COLUMN: &str = "Date";
const DESCRIPTION_COLUMN: &str = "Description";
const VALUE_COLUMN: &str = "Value";

/// How an import treats what is already loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Clear both partitions first
    #[default]
    Replace,
    /// Append to what is already loaded
    Merge,
}

/// Why a row was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowErrorReason {
    InvalidDate(String),
}

impl fmt::Display for RowErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowErrorReason::InvalidDate(value) => write!(f, "invalid date '{}'", value),
        }
    }
}

/// A rejected row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub file: String,
    /// Line number in the source file (the header is line 1)
    pub row: u64,
    pub reason: RowErrorReason,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.row, self.reason)
    }
}

/// A file that could not be read to the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub file: String,
    pub message: String,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Outcome of an import batch
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub files_processed: usize,
    /// Rows routed into the active partition
    pub imported: usize,
    /// Rows routed into the ignored partition
    pub ignored: usize,
    /// Rows dropped because the amount did not parse
    pub skipped_rows: usize,
    pub row_errors: Vec<RowError>,
    pub file_errors: Vec<FileError>,
    /// Failures saving newly seen stores
    pub persistence_errors: Vec<String>,
    /// Stores seen for the first time, in import order
    pub new_stores: Vec<String>,
}

impl ImportReport {
    pub fn total_loaded(&self) -> usize {
        self.imported + self.ignored
    }

    pub fn has_problems(&self) -> bool {
        !self.row_errors.is_empty()
            || !self.file_errors.is_empty()
            || !self.persistence_errors.is_empty()
    }
}

/// Column positions resolved from a header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    description: usize,
    value: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, String> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| format!("missing '{}' column", name))
        };
        Ok(Self {
            date: find(DATE_COLUMN)?,
            description: find(DESCRIPTION_COLUMN)?,
            value: find(VALUE_COLUMN)?,
        })
    }
}

/// Parse a statement date such as "15 Jan 2024"
pub fn parse_statement_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), STATEMENT_DATE_FORMAT).ok()
}

/// Parse a statement amount; thousands separators are tolerated
pub fn parse_statement_amount(value: &str) -> Option<Money> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    Money::parse(&cleaned).ok()
}

/// Import pipeline bound to the category directory it resolves stores with
pub struct ImportPipeline<'a> {
    directory: &'a mut CategoryDirectory,
    categories_io: &'a dyn CategoryPersistence,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(directory: &'a mut CategoryDirectory, categories_io: &'a dyn CategoryPersistence) -> Self {
        Self {
            directory,
            categories_io,
        }
    }

    /// Import a batch of files
    pub fn run<P: AsRef<Path>>(
        &mut self,
        files: &[P],
        mode: LoadMode,
        store: &mut TransactionStore,
        registry: &IgnoreRegistry,
    ) -> ImportReport {
        let mut report = ImportReport::default();

        if mode == LoadMode::Replace {
            store.clear();
        }

        for path in files {
            let path = path.as_ref();
            let name = path.display().to_string();
            match File::open(path) {
                Ok(file) => self.import_reader(&name, file, store, registry, &mut report),
                Err(e) => {
                    warn!(file = %name, error = %e, "cannot open statement");
                    report.file_errors.push(FileError {
                        file: name,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            files = report.files_processed,
            imported = report.imported,
            ignored = report.ignored,
            "import finished"
        );
        report
    }

    /// Import one statement from any reader
    pub fn import_reader<R: Read>(
        &mut self,
        name: &str,
        source: R,
        store: &mut TransactionStore,
        registry: &IgnoreRegistry,
        report: &mut ImportReport,
    ) {
        info!(file = %name, "importing statement");
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let columns = match reader.headers() {
            Ok(headers) => Columns::from_headers(headers),
            Err(e) => Err(e.to_string()),
        };
        let columns = match columns {
            Ok(columns) => columns,
            Err(message) => {
                warn!(file = %name, %message, "unreadable statement header");
                report.file_errors.push(FileError {
                    file: name.to_string(),
                    message,
                });
                return;
            }
        };

        let stores_before = report.new_stores.len();
        let mut record = StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    // Rows imported before the failure are kept
                    warn!(file = %name, error = %e, "statement read aborted");
                    report.file_errors.push(FileError {
                        file: name.to_string(),
                        message: e.to_string(),
                    });
                    break;
                }
            }

            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let field = |idx: usize| record.get(idx).unwrap_or("");

            let Some(date) = parse_statement_date(field(columns.date)) else {
                let value = field(columns.date).to_string();
                warn!(file = %name, line, date = %value, "skipping row with bad date");
                report.row_errors.push(RowError {
                    file: name.to_string(),
                    row: line,
                    reason: RowErrorReason::InvalidDate(value),
                });
                continue;
            };

            let store_name = extract_store_name(field(columns.description));

            let Some(amount) = parse_statement_amount(field(columns.value)) else {
                debug!(file = %name, line, value = field(columns.value), "skipping row with bad amount");
                report.skipped_rows += 1;
                continue;
            };

            if self.directory.ensure_known(&store_name) {
                report.new_stores.push(store_name.clone());
            }
            let category = self.directory.category_for(&store_name).to_string();

            let txn = Transaction::new(date, store_name, amount, category);
            match store.import_transaction(txn, registry) {
                Partition::Active => report.imported += 1,
                Partition::Ignored => report.ignored += 1,
            }
        }

        if report.new_stores.len() > stores_before {
            if let Err(e) = self.directory.save(self.categories_io) {
                warn!(file = %name, error = %e, "failed to save new stores");
                report.persistence_errors.push(e.to_string());
            }
        }
        report.files_processed += 1;
    }
}
