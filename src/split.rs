//! Partitions a catalog into smaller files, either in fixed-size chunks or by
//! reading status.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::{Result, ToolError};
use crate::io::csv_read;
use crate::io::csv_write::{self, RowWriter};

/// Rows per chunk when no size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 50;
/// Column grouped on by [`split_by_status`] unless overridden.
pub const DEFAULT_STATUS_COLUMN: &str = "Exclusive Shelf";
/// Group name for rows without a status value.
pub const UNKNOWN_STATUS: &str = "unknown";

/// Tunables shared by both split modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub chunk_size: usize,
    pub status_column: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            status_column: DEFAULT_STATUS_COLUMN.to_string(),
        }
    }
}

/// A single file produced by a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitFile {
    pub path: PathBuf,
    /// Chunk number (`"1"`, `"2"`, …) or status value the file was named after.
    pub label: String,
    pub rows: usize,
}

/// Files written by a split, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub total_rows: usize,
    pub files: Vec<SplitFile>,
}

/// Resolves `<prefix>_<label>.csv` against the input file's directory.
///
/// An absolute prefix is used unchanged.
pub fn output_path(input: &Path, prefix: &str, label: &str) -> PathBuf {
    let file_name = format!("{prefix}_{label}.csv");
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// Replaces characters that would escape the output directory or are not
/// valid in file names.
pub fn sanitize_label(raw: &str) -> String {
    let invalid = ['/', '\\', ':', '?', '*', '"', '<', '>', '|'];
    raw.chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect()
}

/// Writes consecutive groups of at most `chunk_size` data rows into
/// `<prefix>_1.csv`, `<prefix>_2.csv`, … each starting with the input header.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), prefix = %prefix, chunk_size = chunk_size)
)]
pub fn split_fixed(input: &Path, prefix: &str, chunk_size: usize) -> Result<SplitReport> {
    if chunk_size == 0 {
        return Err(ToolError::InvalidChunkSize(chunk_size));
    }

    let table = csv_read::read_table(input)?;
    let chunk_count = table.len().div_ceil(chunk_size);
    info!(
        total_rows = table.len(),
        chunk_count, "splitting catalog into fixed-size chunks"
    );

    let mut report = SplitReport {
        total_rows: table.len(),
        files: Vec::with_capacity(chunk_count),
    };

    for (index, chunk) in table.rows.chunks(chunk_size).enumerate() {
        let label = (index + 1).to_string();
        let path = output_path(input, prefix, &label);
        let rows = csv_write::write_rows(&path, &table.headers, chunk)?;
        debug!(file = %path.display(), rows, "chunk written");
        report.files.push(SplitFile { path, label, rows });
    }

    Ok(report)
}

/// Writes one `<prefix>_<status>.csv` per distinct value of
/// `status_column`, preserving the relative order of rows within each status.
///
/// Output files are created when the first row with a given status is seen.
/// Path separators in a status are replaced by `_` in the file name.
/// Rows with no status value, or files without the column, go to
/// [`UNKNOWN_STATUS`].
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), prefix = %prefix, status_column = %status_column)
)]
pub fn split_by_status(input: &Path, prefix: &str, status_column: &str) -> Result<SplitReport> {
    let table = csv_read::read_table(input)?;
    if !table.has_column(status_column) {
        debug!(status_column, "status column absent; every row is unknown");
    }

    let mut order: Vec<(String, PathBuf)> = Vec::new();
    let mut writers: HashMap<String, RowWriter> = HashMap::new();

    for row in &table.rows {
        let status = match row.get(status_column) {
            Some(value) if !value.is_empty() => value,
            _ => UNKNOWN_STATUS,
        };

        let writer = match writers.entry(status.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let path = output_path(input, prefix, &sanitize_label(status));
                debug!(status, file = %path.display(), "creating status file");
                order.push((status.to_string(), path.clone()));
                entry.insert(RowWriter::create(&path, &table.headers)?)
            }
        };
        writer.write_row(row)?;
    }

    let mut report = SplitReport {
        total_rows: table.len(),
        files: Vec::with_capacity(order.len()),
    };
    for (label, path) in order {
        if let Some(writer) = writers.remove(&label) {
            let rows = writer.finish()?;
            report.files.push(SplitFile { path, label, rows });
        }
    }

    info!(
        total_rows = report.total_rows,
        file_count = report.files.len(),
        "catalog split by status"
    );
    Ok(report)
}

/// Runs either split mode according to `by_status`.
pub fn split_catalog(
    input: &Path,
    prefix: &str,
    by_status: bool,
    options: &SplitOptions,
) -> Result<SplitReport> {
    if by_status {
        split_by_status(input, prefix, &options.status_column)
    } else {
        split_fixed(input, prefix, options.chunk_size)
    }
}
