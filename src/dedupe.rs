//! Filters a catalog down to the books that another catalog does not already
//! contain.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::headers::{CanonicalField, ResolvedColumns};
use crate::io::{csv_read, csv_write};
use crate::model::{CsvRow, CsvTable};

/// Number of raw lines echoed per file when previewing inputs.
pub const PREVIEW_LINES: usize = 3;

/// Key used to decide whether two rows describe the same book.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Isbn(String),
    TitleAuthor { title: String, author: String },
    Title(String),
}

/// Derives one kind of identity key from a row.
pub type KeyStrategy = fn(&CsvRow, &ResolvedColumns) -> Option<IdentityKey>;

/// Every strategy, in priority order. A candidate row is a duplicate when any
/// of these keys is already known.
pub const KEY_STRATEGIES: [KeyStrategy; 3] = [isbn_key, title_author_key, title_key];

/// Name-based strategies used when indexing the existing catalog; only the
/// first one that yields a key is recorded.
const NAME_STRATEGIES: [KeyStrategy; 2] = [title_author_key, title_key];

/// Outcome of a catalog comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareSummary {
    pub unique: usize,
    pub duplicates: usize,
}

/// Strips hyphens and spreadsheet formula quoting (`="..."`) from an ISBN.
pub fn normalize_isbn(raw: &str) -> String {
    raw.trim()
        .replace('-', "")
        .replace("=\"", "")
        .replace('"', "")
}

/// Trims and lowercases a title or author name.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn cell<'a>(row: &'a CsvRow, columns: &ResolvedColumns, field: CanonicalField) -> &'a str {
    columns
        .column(field)
        .and_then(|column| row.get(column))
        .unwrap_or_default()
}

pub fn isbn_key(row: &CsvRow, columns: &ResolvedColumns) -> Option<IdentityKey> {
    let isbn = normalize_isbn(cell(row, columns, CanonicalField::Isbn));
    (!isbn.is_empty()).then_some(IdentityKey::Isbn(isbn))
}

pub fn title_author_key(row: &CsvRow, columns: &ResolvedColumns) -> Option<IdentityKey> {
    let author = normalize_text(cell(row, columns, CanonicalField::Author));
    if author.is_empty() {
        return None;
    }
    Some(IdentityKey::TitleAuthor {
        title: normalize_text(cell(row, columns, CanonicalField::Title)),
        author,
    })
}

pub fn title_key(row: &CsvRow, columns: &ResolvedColumns) -> Option<IdentityKey> {
    Some(IdentityKey::Title(normalize_text(cell(
        row,
        columns,
        CanonicalField::Title,
    ))))
}

/// Set of identity keys known from the existing catalog.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    keys: HashSet<IdentityKey>,
}

impl CatalogIndex {
    /// Indexes every row of `table`: its ISBN key when present, plus its
    /// title+author key, or its bare title when no author is recorded.
    pub fn build(table: &CsvTable, columns: &ResolvedColumns) -> Self {
        let mut index = Self::default();
        for row in &table.rows {
            index.keys.extend(isbn_key(row, columns));
            index.keys.extend(
                NAME_STRATEGIES
                    .iter()
                    .find_map(|strategy| strategy(row, columns)),
            );
        }
        index
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns `true` when any key derivable from `row` is already indexed.
    pub fn matches(&self, row: &CsvRow, columns: &ResolvedColumns) -> bool {
        KEY_STRATEGIES
            .iter()
            .filter_map(|strategy| strategy(row, columns))
            .any(|key| self.contains(&key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Returns the rows of `new` that are not present in `existing`, in their
/// original order.
pub fn unique_rows<'a>(
    new: &'a CsvTable,
    new_columns: &ResolvedColumns,
    existing: &CsvTable,
    existing_columns: &ResolvedColumns,
) -> Vec<&'a CsvRow> {
    let index = CatalogIndex::build(existing, existing_columns);
    debug!(key_count = index.len(), "indexed existing catalog");
    new.rows
        .iter()
        .filter(|row| !index.matches(row, new_columns))
        .collect()
}

/// Writes the entries of `new_file` that do not appear in `existing_file` to
/// `output_file`, keeping the new file's header and row order.
///
/// Nothing is written when either input is missing or lacks a title column.
#[instrument(
    level = "info",
    skip_all,
    fields(
        new = %new_file.display(),
        existing = %existing_file.display(),
        output = %output_file.display()
    )
)]
pub fn compare_catalogs(
    new_file: &Path,
    existing_file: &Path,
    output_file: &Path,
) -> Result<CompareSummary> {
    csv_read::ensure_exists(new_file)?;
    csv_read::ensure_exists(existing_file)?;

    let existing = csv_read::read_table(existing_file)?;
    let new = csv_read::read_table(new_file)?;

    let existing_columns = ResolvedColumns::resolve(existing.headers.as_slice());
    let new_columns = ResolvedColumns::resolve(new.headers.as_slice());
    debug!(?existing_columns, ?new_columns, "resolved catalog columns");

    for (path, table, columns) in [
        (existing_file, &existing, &existing_columns),
        (new_file, &new, &new_columns),
    ] {
        if columns.title.is_none() {
            warn!(
                existing_headers = ?existing.headers,
                new_headers = ?new.headers,
                "title column missing"
            );
            return Err(ToolError::MissingColumn {
                column: CanonicalField::Title.label().to_string(),
                path: path.to_path_buf(),
                headers: table.headers.to_vec(),
            });
        }
    }

    let unique = unique_rows(&new, &new_columns, &existing, &existing_columns);
    let summary = CompareSummary {
        unique: unique.len(),
        duplicates: new.len() - unique.len(),
    };

    csv_write::write_rows(output_file, &new.headers, unique)?;
    info!(
        unique = summary.unique,
        duplicates = summary.duplicates,
        "catalog comparison written"
    );
    Ok(summary)
}

/// Logs the first few raw lines of each input to help diagnose header
/// mismatches.
pub fn preview_inputs(paths: &[&Path]) -> Result<()> {
    for path in paths {
        let lines = csv_read::preview_lines(path, PREVIEW_LINES)?;
        info!(file = %path.display(), ?lines, "input preview");
    }
    Ok(())
}
