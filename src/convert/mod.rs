//! Converts a StoryGraph export into a file the Goodreads importer accepts.

pub mod schema;
pub mod transcode;

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::io::{csv_read, csv_write};
use crate::model::CsvRow;

use schema::{
    DEFAULT_DATE_ADDED, GOODREADS_HEADERS, GoodreadsRecord, OWNED_COLUMN, READ_STATUS_COLUMN,
    Shelf, TargetField,
};

/// Number of leading rows whose status mapping is logged at debug level.
const STATUS_PREVIEW_ROWS: usize = 5;

/// Per-shelf counts of a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub read: usize,
    pub to_read: usize,
    pub currently_reading: usize,
    pub other: usize,
}

impl ConversionSummary {
    pub fn from_records(records: &[GoodreadsRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.exclusive_shelf.as_str() {
                "read" => summary.read += 1,
                "to-read" => summary.to_read += 1,
                "currently-reading" => summary.currently_reading += 1,
                _ => summary.other += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.read + self.to_read + self.currently_reading + self.other
    }

    /// `(label, count)` pairs for every non-empty bucket.
    pub fn buckets(&self) -> Vec<(&'static str, usize)> {
        [
            ("read", self.read),
            ("to-read", self.to_read),
            ("currently-reading", self.currently_reading),
            ("other", self.other),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

/// Builds the Goodreads record for one StoryGraph row.
///
/// The record starts from the Goodreads defaults, the status is mapped first,
/// every mapped column is then transcoded, and finally `Date Read` is cleared
/// unless the book is shelved as read.
pub fn convert_row(row: &CsvRow) -> GoodreadsRecord {
    let mut record = GoodreadsRecord::default();

    let shelf = Shelf::from_storygraph(row.get(READ_STATUS_COLUMN).unwrap_or_default());
    apply_shelf(&mut record, shelf);

    for (column, value) in row.fields() {
        if let Some(target) = schema::target_for(column) {
            apply_field(&mut record, target, value);
        }
    }

    record.author_last_first = transcode::author_last_first(&record.author);

    if let Some(owned) = row.get(OWNED_COLUMN) {
        record.owned_copies = transcode::convert_owned(owned);
    }

    enforce_read_date(&mut record, shelf);
    record
}

fn apply_shelf(record: &mut GoodreadsRecord, shelf: Shelf) {
    record.exclusive_shelf = shelf.as_str().to_string();
    record.bookshelves = shelf.as_str().to_string();
    record.bookshelves_with_positions = format!("{shelf} (#1)");
}

fn apply_field(record: &mut GoodreadsRecord, target: TargetField, value: &str) {
    match target {
        // Mapped up front from the raw status.
        TargetField::ExclusiveShelf => {}
        TargetField::DateAdded => {
            let date = transcode::convert_date(value);
            record.date_added = if date.is_empty() {
                DEFAULT_DATE_ADDED.to_string()
            } else {
                date
            };
        }
        TargetField::DateRead => record.date_read = transcode::convert_date(value),
        TargetField::MyRating => record.my_rating = transcode::convert_rating(value),
        TargetField::ReadCount => record.read_count = transcode::convert_read_count(value),
        TargetField::Isbn13 => {
            if let Some(cells) = transcode::convert_isbn(value) {
                record.isbn = cells.isbn;
                record.isbn13 = cells.isbn13;
            }
        }
        TargetField::Title => record.title = value.to_string(),
        TargetField::Author => record.author = value.to_string(),
        TargetField::Binding => record.binding = value.to_string(),
        TargetField::MyReview => record.my_review = value.to_string(),
        TargetField::Bookshelves => record.bookshelves = value.to_string(),
    }
}

/// A read date is only meaningful for books on the read shelf.
fn enforce_read_date(record: &mut GoodreadsRecord, shelf: Shelf) {
    if shelf != Shelf::Read {
        record.date_read.clear();
    }
}

/// Converts the StoryGraph export at `input` into a Goodreads import file at
/// `output`, returning per-shelf counts of the written rows.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn convert_csv(input: &Path, output: &Path) -> Result<ConversionSummary> {
    let table = csv_read::read_table(input)?;
    info!(row_count = table.len(), "read StoryGraph export");

    for (index, row) in table.rows.iter().take(STATUS_PREVIEW_ROWS).enumerate() {
        let status = row.get(READ_STATUS_COLUMN).unwrap_or_default();
        debug!(
            row = index + 1,
            status,
            shelf = %Shelf::from_storygraph(status),
            "read status preview"
        );
    }

    let records: Vec<GoodreadsRecord> = table.rows.iter().map(convert_row).collect();
    csv_write::write_records(output, &GOODREADS_HEADERS, &records)?;

    let summary = ConversionSummary::from_records(&records);
    info!(
        total = summary.total(),
        read = summary.read,
        to_read = summary.to_read,
        currently_reading = summary.currently_reading,
        other = summary.other,
        "Goodreads import written"
    );
    Ok(summary)
}
