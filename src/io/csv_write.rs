use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use serde::Serialize;

use crate::error::Result;
use crate::model::CsvRow;

/// Writes a header followed by the given rows, preserving each row's cells
/// exactly as they were read.
pub fn write_rows<'a, I>(path: &Path, headers: &[String], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a CsvRow>,
{
    let mut writer = RowWriter::create(path, headers)?;
    for row in rows {
        writer.write_row(row)?;
    }
    writer.finish()
}

/// Writes `headers` followed by `records` serialised through serde.
///
/// The header is written explicitly so that an empty record set still yields
/// a valid file.
pub fn write_records<T: Serialize>(path: &Path, headers: &[&str], records: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(headers)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Incremental writer for a single CSV output file that shares the header of
/// its source table.
pub struct RowWriter {
    inner: Writer<File>,
    rows_written: usize,
}

impl RowWriter {
    /// Creates (or truncates) the file at `path` and writes the header row.
    pub fn create(path: &Path, headers: &[String]) -> Result<Self> {
        let mut inner = WriterBuilder::new().flexible(true).from_path(path)?;
        inner.write_record(headers)?;
        Ok(Self {
            inner,
            rows_written: 0,
        })
    }

    pub fn write_row(&mut self, row: &CsvRow) -> Result<()> {
        self.inner.write_record(row.cells())?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flushes buffered output and returns the number of data rows written.
    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush()?;
        Ok(self.rows_written)
    }
}
