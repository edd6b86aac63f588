use std::sync::Arc;

/// A CSV file loaded fully into memory.
///
/// The header is shared between the table and every row so that rows can be
/// looked up by column name without copying the header per record.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Arc<Vec<String>>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Creates a table from a header and raw cell vectors.
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let headers = Arc::new(headers);
        let rows = records
            .into_iter()
            .map(|cells| CsvRow::new(Arc::clone(&headers), cells))
            .collect();
        Self { headers, rows }
    }

    /// Returns `true` when the given column name appears in the header.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One data record: an ordered mapping from column name to cell value.
///
/// Columns are fixed by the owning file's header. Records shorter than the
/// header simply have no value for the trailing columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    headers: Arc<Vec<String>>,
    cells: Vec<String>,
}

impl CsvRow {
    pub fn new(headers: Arc<Vec<String>>, cells: Vec<String>) -> Self {
        Self { headers, cells }
    }

    /// Looks up the cell stored under `column`, if the column exists and the
    /// record is long enough to carry it.
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.headers.iter().position(|header| header == column)?;
        self.cells.get(index).map(String::as_str)
    }

    /// Raw cells in header order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Iterates `(column, value)` pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(String::as_str))
    }
}
