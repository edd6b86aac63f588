//! Header alias resolution for loosely specified catalog exports.

/// Logical columns the catalog tools need to find regardless of how an export
/// spells them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Title,
    Author,
    Isbn,
}

impl CanonicalField {
    /// Accepted header spellings, in priority order.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Title => &["Title", "title"],
            CanonicalField::Author => &["Authors", "Author", "authors", "author"],
            CanonicalField::Isbn => &["ISBN/UID", "ISBN", "isbn", "ISBN13", "isbn13"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::Title => "title",
            CanonicalField::Author => "author",
            CanonicalField::Isbn => "ISBN",
        }
    }
}

/// Returns the first candidate that appears in `headers`, or `None` when no
/// candidate matches.
pub fn find_column<'a, H>(headers: &[H], candidates: &[&'a str]) -> Option<&'a str>
where
    H: AsRef<str>,
{
    candidates
        .iter()
        .copied()
        .find(|candidate| headers.iter().any(|header| header.as_ref() == *candidate))
}

/// Column names resolved once for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
}

impl ResolvedColumns {
    pub fn resolve<H: AsRef<str>>(headers: &[H]) -> Self {
        let lookup =
            |field: CanonicalField| find_column(headers, field.aliases()).map(str::to_string);
        Self {
            title: lookup(CanonicalField::Title),
            author: lookup(CanonicalField::Author),
            isbn: lookup(CanonicalField::Isbn),
        }
    }

    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Title => self.title.as_deref(),
            CanonicalField::Author => self.author.as_deref(),
            CanonicalField::Isbn => self.isbn.as_deref(),
        }
    }
}
