//! Source and destination vocabularies for the StoryGraph → Goodreads
//! conversion.

use serde::Serialize;

/// Formula-escaped empty ISBN cell expected by the Goodreads importer.
pub const EMPTY_ISBN: &str = "=\"\"\"\"";
/// Written into the ISBN column that does not carry the converted value.
pub const BLANK_ISBN: &str = "=\"\"=\"\"";
/// Used when a book has no usable "Date Added".
pub const DEFAULT_DATE_ADDED: &str = "2025/01/01";

/// StoryGraph column holding the reading status.
pub const READ_STATUS_COLUMN: &str = "Read Status";
/// StoryGraph column holding the ownership flag.
pub const OWNED_COLUMN: &str = "Owned?";

/// Goodreads import header, in output order.
pub const GOODREADS_HEADERS: [&str; 24] = [
    "Book Id",
    "Title",
    "Author",
    "Author l-f",
    "Additional Authors",
    "ISBN",
    "ISBN13",
    "My Rating",
    "Average Rating",
    "Publisher",
    "Binding",
    "Number of Pages",
    "Year Published",
    "Original Publication Year",
    "Date Read",
    "Date Added",
    "Bookshelves",
    "Bookshelves with positions",
    "Exclusive Shelf",
    "My Review",
    "Spoiler",
    "Private Notes",
    "Read Count",
    "Owned Copies",
];

/// Goodreads columns that receive a value from a StoryGraph column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetField {
    Title,
    Author,
    Isbn13,
    Binding,
    ExclusiveShelf,
    DateAdded,
    DateRead,
    ReadCount,
    MyRating,
    MyReview,
    Bookshelves,
}

/// StoryGraph column → Goodreads column.
pub const FIELD_MAPPING: [(&str, TargetField); 11] = [
    ("Title", TargetField::Title),
    ("Authors", TargetField::Author),
    ("ISBN/UID", TargetField::Isbn13),
    ("Format", TargetField::Binding),
    ("Read Status", TargetField::ExclusiveShelf),
    ("Date Added", TargetField::DateAdded),
    ("Last Date Read", TargetField::DateRead),
    ("Read Count", TargetField::ReadCount),
    ("Star Rating", TargetField::MyRating),
    ("Review", TargetField::MyReview),
    ("Tags", TargetField::Bookshelves),
];

/// Looks up the Goodreads destination of a StoryGraph column.
pub fn target_for(source_column: &str) -> Option<TargetField> {
    FIELD_MAPPING
        .iter()
        .find(|(source, _)| *source == source_column)
        .map(|(_, target)| *target)
}

/// Goodreads exclusive shelves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shelf {
    Read,
    CurrentlyReading,
    #[default]
    ToRead,
    Abandoned,
}

impl Shelf {
    /// Maps a StoryGraph reading status, ignoring case and surrounding
    /// whitespace. Unrecognised or empty statuses land on `to-read`.
    pub fn from_storygraph(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "read" => Shelf::Read,
            "currently-reading" | "currently reading" => Shelf::CurrentlyReading,
            "to-read" | "to read" | "to-read pile" => Shelf::ToRead,
            "dnf" => Shelf::Abandoned,
            _ => Shelf::ToRead,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shelf::Read => "read",
            Shelf::CurrentlyReading => "currently-reading",
            Shelf::ToRead => "to-read",
            Shelf::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for Shelf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a Goodreads import file. Field order is the column order of
/// [`GOODREADS_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoodreadsRecord {
    #[serde(rename = "Book Id")]
    pub book_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Author l-f")]
    pub author_last_first: String,
    #[serde(rename = "Additional Authors")]
    pub additional_authors: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "ISBN13")]
    pub isbn13: String,
    #[serde(rename = "My Rating")]
    pub my_rating: String,
    #[serde(rename = "Average Rating")]
    pub average_rating: String,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    #[serde(rename = "Binding")]
    pub binding: String,
    #[serde(rename = "Number of Pages")]
    pub number_of_pages: String,
    #[serde(rename = "Year Published")]
    pub year_published: String,
    #[serde(rename = "Original Publication Year")]
    pub original_publication_year: String,
    #[serde(rename = "Date Read")]
    pub date_read: String,
    #[serde(rename = "Date Added")]
    pub date_added: String,
    #[serde(rename = "Bookshelves")]
    pub bookshelves: String,
    #[serde(rename = "Bookshelves with positions")]
    pub bookshelves_with_positions: String,
    #[serde(rename = "Exclusive Shelf")]
    pub exclusive_shelf: String,
    #[serde(rename = "My Review")]
    pub my_review: String,
    #[serde(rename = "Spoiler")]
    pub spoiler: String,
    #[serde(rename = "Private Notes")]
    pub private_notes: String,
    #[serde(rename = "Read Count")]
    pub read_count: String,
    #[serde(rename = "Owned Copies")]
    pub owned_copies: String,
}

impl Default for GoodreadsRecord {
    fn default() -> Self {
        Self {
            book_id: String::new(),
            title: String::new(),
            author: String::new(),
            author_last_first: String::new(),
            additional_authors: String::new(),
            isbn: EMPTY_ISBN.to_string(),
            isbn13: EMPTY_ISBN.to_string(),
            my_rating: "0".to_string(),
            average_rating: String::new(),
            publisher: String::new(),
            binding: String::new(),
            number_of_pages: String::new(),
            year_published: String::new(),
            original_publication_year: String::new(),
            date_read: String::new(),
            date_added: String::new(),
            bookshelves: String::new(),
            bookshelves_with_positions: String::new(),
            exclusive_shelf: Shelf::default().as_str().to_string(),
            my_review: String::new(),
            spoiler: String::new(),
            private_notes: String::new(),
            read_count: "0".to_string(),
            owned_copies: "0".to_string(),
        }
    }
}
