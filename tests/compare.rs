use std::fs;
use std::path::{Path, PathBuf};

use shelfsync::ToolError;
use shelfsync::dedupe::{self, CatalogIndex, IdentityKey};
use shelfsync::headers::{CanonicalField, ResolvedColumns, find_column};
use shelfsync::io::csv_read;
use tempfile::tempdir;

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("CSV fixture written");
    path
}

fn titles(path: &Path) -> Vec<String> {
    let table = csv_read::read_table(path).expect("output read");
    table
        .rows
        .iter()
        .map(|row| row.get("Title").unwrap_or_default().to_string())
        .collect()
}

#[test]
fn find_column_returns_first_matching_alias() {
    let headers = ["isbn13", "Author", "Title", "Authors"];
    assert_eq!(
        find_column(&headers, CanonicalField::Author.aliases()),
        Some("Authors")
    );
    assert_eq!(find_column(&headers, &["Title", "title"]), Some("Title"));
    assert_eq!(find_column(&headers, &["Publisher"]), None);
}

#[test]
fn resolved_columns_tolerate_lowercase_headers() {
    let headers = vec!["title".to_string(), "author".to_string()];
    let columns = ResolvedColumns::resolve(headers.as_slice());
    assert_eq!(columns.title.as_deref(), Some("title"));
    assert_eq!(columns.author.as_deref(), Some("author"));
    assert_eq!(columns.isbn, None);
}

#[test]
fn normalize_isbn_strips_hyphens_and_formula_quoting() {
    assert_eq!(dedupe::normalize_isbn(" 978-0-441-17271-9 "), "9780441172719");
    assert_eq!(dedupe::normalize_isbn("=\"9780441172719\""), "9780441172719");
    assert_eq!(dedupe::normalize_isbn("=\"\"=\"\""), "");
}

#[test]
fn index_records_isbn_and_name_keys() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(
        temp_dir.path(),
        "existing.csv",
        "Title,Authors,ISBN/UID\nDune,Frank Herbert,978-0441172719\nAnonymous Tales,,\n",
    );
    let table = csv_read::read_table(&path).expect("table read");
    let columns = ResolvedColumns::resolve(table.headers.as_slice());
    let index = CatalogIndex::build(&table, &columns);

    assert!(index.contains(&IdentityKey::Isbn("9780441172719".into())));
    assert!(index.contains(&IdentityKey::TitleAuthor {
        title: "dune".into(),
        author: "frank herbert".into(),
    }));
    assert!(!index.contains(&IdentityKey::Title("dune".into())));
    assert!(index.contains(&IdentityKey::Title("anonymous tales".into())));
    assert_eq!(index.len(), 3);
    assert!(!index.is_empty());
}

#[test]
fn index_of_header_only_catalog_is_empty() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(temp_dir.path(), "existing.csv", "Title,Authors\n");
    let table = csv_read::read_table(&path).expect("table read");
    let columns = ResolvedColumns::resolve(table.headers.as_slice());

    let index = CatalogIndex::build(&table, &columns);

    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
}

#[test]
fn preview_inputs_reads_each_file_and_reports_missing_ones() {
    let temp_dir = tempdir().expect("temporary directory");
    let first = write_csv(
        temp_dir.path(),
        "first.csv",
        "Title\nDune\nSolaris\nKindred\nPiranesi\n",
    );
    let second = write_csv(temp_dir.path(), "second.csv", "Title\n");

    dedupe::preview_inputs(&[first.as_path(), second.as_path()]).expect("previews logged");
    assert_eq!(
        csv_read::preview_lines(&first, dedupe::PREVIEW_LINES).expect("lines read"),
        vec!["Title".to_string(), "Dune".to_string(), "Solaris".to_string()]
    );

    let missing = temp_dir.path().join("absent.csv");
    let error = dedupe::preview_inputs(&[first.as_path(), missing.as_path()])
        .expect_err("missing file reported");
    assert!(matches!(error, ToolError::MissingInput(path) if path == missing));
}

#[test]
fn disjoint_catalogs_keep_every_new_row_in_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let new_file = write_csv(
        temp_dir.path(),
        "new.csv",
        "Title,Authors,ISBN/UID,Format\n\
         Piranesi,Susanna Clarke,9781635575637,hardcover\n\
         Dune,Frank Herbert,9780441172719,paperback\n\
         \"Gideon, the Ninth\",Tamsyn Muir,9781250313188,ebook\n",
    );
    let existing_file = write_csv(
        temp_dir.path(),
        "existing.csv",
        "Title,Author,ISBN\nNeuromancer,William Gibson,9780441569595\n",
    );
    let output = temp_dir.path().join("unique.csv");

    let summary =
        dedupe::compare_catalogs(&new_file, &existing_file, &output).expect("comparison runs");

    assert_eq!(summary.unique, 3);
    assert_eq!(summary.duplicates, 0);
    let original = csv_read::read_table(&new_file).expect("new file read");
    let written = csv_read::read_table(&output).expect("output read");
    assert_eq!(original, written);
}

#[test]
fn rows_matching_any_identity_key_are_dropped() {
    let temp_dir = tempdir().expect("temporary directory");
    let new_file = write_csv(
        temp_dir.path(),
        "new.csv",
        "Title,Authors,ISBN/UID\n\
         Same Isbn Different Title,Someone,978-0441172719\n\
         the left hand of darkness,ursula k. le guin,\n\
         Solaris,Stanislaw Lem,\n\
         Fresh Book,New Author,9781111111111\n",
    );
    let existing_file = write_csv(
        temp_dir.path(),
        "existing.csv",
        "title,authors,isbn13\n\
         Dune,Frank Herbert,\"=\"\"9780441172719\"\"\"\n\
         The Left Hand of Darkness,Ursula K. Le Guin,\n\
         Solaris,,\n",
    );
    let output = temp_dir.path().join("unique.csv");

    let summary =
        dedupe::compare_catalogs(&new_file, &existing_file, &output).expect("comparison runs");

    assert_eq!(summary.unique, 1);
    assert_eq!(summary.duplicates, 3);
    assert_eq!(titles(&output), vec!["Fresh Book".to_string()]);

    let table = csv_read::read_table(&output).expect("output read");
    assert_eq!(
        table.headers.as_slice(),
        ["Title", "Authors", "ISBN/UID"].map(String::from).as_slice()
    );
}

#[test]
fn missing_title_column_aborts_without_output() {
    let temp_dir = tempdir().expect("temporary directory");
    let new_file = write_csv(temp_dir.path(), "new.csv", "Name,Authors\nDune,Frank Herbert\n");
    let existing_file = write_csv(temp_dir.path(), "existing.csv", "Title\nDune\n");
    let output = temp_dir.path().join("unique.csv");

    let error = dedupe::compare_catalogs(&new_file, &existing_file, &output)
        .expect_err("title column is required");

    match error {
        ToolError::MissingColumn { path, headers, .. } => {
            assert_eq!(path, new_file);
            assert_eq!(headers, vec!["Name".to_string(), "Authors".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn missing_input_aborts_without_output() {
    let temp_dir = tempdir().expect("temporary directory");
    let existing_file = write_csv(temp_dir.path(), "existing.csv", "Title\nDune\n");
    let new_file = temp_dir.path().join("absent.csv");
    let output = temp_dir.path().join("unique.csv");

    let error = dedupe::compare_catalogs(&new_file, &existing_file, &output)
        .expect_err("missing input is reported");

    assert!(matches!(error, ToolError::MissingInput(path) if path == new_file));
    assert!(!output.exists());
}
