//! Value-level conversions between the two catalog dialects.
//!
//! None of these functions fail: a value that cannot be understood degrades
//! to an empty string or `"0"`.

use chrono::{Datelike, NaiveDate};

use crate::convert::schema::BLANK_ISBN;

/// Layout using the full English month name.
const VERBOSE_DATE_FORMAT: &str = "%B %d, %Y";
/// Date layouts seen in StoryGraph exports, tried in order.
pub const SOURCE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", VERBOSE_DATE_FORMAT];
/// Layout expected by Goodreads.
pub const GOODREADS_DATE_FORMAT: &str = "%Y/%m/%d";

/// Rewrites a date as `YYYY/MM/DD`. Values already in that layout are
/// returned unchanged; anything unparseable becomes empty.
///
/// Years must be written with four digits and month names in full, so
/// `15/03/24` and `Mar 15, 2024` are rejected.
pub fn convert_date(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    for format in SOURCE_DATE_FORMATS {
        if let Some(date) = parse_date(value, format) {
            return date.format(GOODREADS_DATE_FORMAT).to_string();
        }
    }

    if parse_date(value, GOODREADS_DATE_FORMAT).is_some() {
        return value.to_string();
    }

    String::new()
}

fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, format).ok()?;
    if !(1000..=9999).contains(&date.year()) {
        return None;
    }
    if format == VERBOSE_DATE_FORMAT {
        // chrono's %B also accepts abbreviations.
        let month = value.split_whitespace().next().unwrap_or_default();
        if !month.eq_ignore_ascii_case(&date.format("%B").to_string()) {
            return None;
        }
    }
    Some(date)
}

/// Converts a rating such as `"4.5"` or `"5 stars"` into a whole number of
/// stars, truncating any fraction.
pub fn convert_rating(raw: &str) -> String {
    let value = raw.trim();
    let number = if value.to_lowercase().contains("star") {
        value.split_whitespace().next().unwrap_or_default()
    } else {
        value
    };
    truncate_number(number)
        .map(|stars| stars.to_string())
        .unwrap_or_else(|| "0".to_string())
}

/// Parses a read count, truncating fractions and clamping negatives to zero.
pub fn convert_read_count(raw: &str) -> String {
    truncate_number(raw.trim())
        .map(|count| count.max(0).to_string())
        .unwrap_or_else(|| "0".to_string())
}

fn truncate_number(value: &str) -> Option<i64> {
    let number: f64 = value.parse().ok()?;
    number.is_finite().then(|| number.trunc() as i64)
}

/// The pair of formula-escaped ISBN cells derived from a StoryGraph ISBN/UID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsbnCells {
    pub isbn: String,
    pub isbn13: String,
}

/// Keeps only the digits of `raw` and routes them to the ISBN-10 or ISBN-13
/// column. Returns `None` when the digit count matches neither, in which case
/// both columns keep their defaults.
pub fn convert_isbn(raw: &str) -> Option<IsbnCells> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => Some(IsbnCells {
            isbn: formula_escape(&digits),
            isbn13: BLANK_ISBN.to_string(),
        }),
        13 => Some(IsbnCells {
            isbn: BLANK_ISBN.to_string(),
            isbn13: formula_escape(&digits),
        }),
        _ => None,
    }
}

/// Wraps a value the way Goodreads exports do so that spreadsheets keep it
/// as text.
pub fn formula_escape(value: &str) -> String {
    format!("=\"\"{value}\"\"")
}

/// Formats `"Ursula K. Le Guin"` as `"Guin, Ursula K. Le"`: the last
/// whitespace-separated token is taken as the surname. Single-token names
/// yield an empty string.
pub fn author_last_first(author: &str) -> String {
    let parts: Vec<&str> = author.split_whitespace().collect();
    match parts.split_last() {
        Some((last, given)) if !given.is_empty() => format!("{last}, {}", given.join(" ")),
        _ => String::new(),
    }
}

/// Interprets a yes/no style ownership flag as a copy count.
pub fn convert_owned(raw: &str) -> String {
    let owned = matches!(
        raw.trim().to_lowercase().as_str(),
        "yes" | "true" | "y" | "1"
    );
    if owned { "1" } else { "0" }.to_string()
}
