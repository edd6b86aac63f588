use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, ToolError};
use crate::model::CsvTable;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads a whole CSV file, header included, into memory.
///
/// Records may be shorter or longer than the header; such rows are kept as-is
/// so that exports with ragged trailing columns still load.
pub fn read_table(path: &Path) -> Result<CsvTable> {
    ensure_exists(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix(BYTE_ORDER_MARK) {
            *first = stripped.to_string();
        }
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable::new(headers, records))
}

/// Returns up to `limit` raw lines from the start of the file, used for
/// diagnosing header mismatches.
pub fn preview_lines(path: &Path, limit: usize) -> Result<Vec<String>> {
    ensure_exists(path)?;
    let reader = BufReader::new(File::open(path)?);
    reader
        .lines()
        .take(limit)
        .map(|line| line.map(|line| line.trim().to_string()).map_err(ToolError::from))
        .collect()
}

/// Fails with [`ToolError::MissingInput`] when `path` does not exist.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolError::MissingInput(path.to_path_buf()))
    }
}
