//! File I/O utilities with atomic writes
//!
//! The persisted category map, ignore list and settings are all two-column
//! CSV files; the session snapshot is JSON. Writes go to a temp file in the
//! same directory which is then renamed over the target, so a failed write
//! never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TrackerError;

/// Read a two-column CSV file into (key, value) pairs
///
/// A missing or empty file yields no rows. Rows with fewer than two fields
/// are skipped; fields beyond the second are ignored. When `has_header` is
/// set, the first row is discarded.
pub fn read_csv_pairs<P: AsRef<Path>>(
    path: P,
    has_header: bool,
) -> Result<Vec<(String, String)>, TrackerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            TrackerError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        if let (Some(key), Some(value)) = (record.get(0), record.get(1)) {
            rows.push((key.to_string(), value.to_string()));
        }
    }

    Ok(rows)
}

/// Write (key, value) pairs as a two-column CSV file atomically
pub fn write_csv_pairs_atomic<'a, P, I>(
    path: P,
    header: Option<[&str; 2]>,
    rows: I,
) -> Result<(), TrackerError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let path = path.as_ref();
    let temp_path = prepare_temp_path(path, "csv.tmp")?;

    let file = File::create(&temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    if let Some(header) = header {
        writer
            .write_record(header)
            .map_err(|e| TrackerError::Storage(format!("Failed to write header: {}", e)))?;
    }
    for (key, value) in rows {
        writer
            .write_record([key, value])
            .map_err(|e| TrackerError::Storage(format!("Failed to write row: {}", e)))?;
    }

    let buffered = writer
        .into_inner()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;
    let file = buffered
        .into_inner()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;
    file.sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))?;

    commit_temp_file(&temp_path, path)
}

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, TrackerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| TrackerError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = prepare_temp_path(path, "json.tmp")?;

    let file = File::create(&temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))?;

    commit_temp_file(&temp_path, path)
}

fn prepare_temp_path(path: &Path, extension: &str) -> Result<PathBuf, TrackerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    Ok(path.with_extension(extension))
}

fn commit_temp_file(temp_path: &Path, path: &Path) -> Result<(), TrackerError> {
    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        TrackerError::Storage(format!("Failed to rename temp file: {}", e))
    })
}
