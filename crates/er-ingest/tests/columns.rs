use std::io::Write;

use er_core::input::Side;
use er_core::{MatchOptions, Matcher};
use er_ingest::{IngestError, read_csv};
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_loads_columns_from_two_files_and_matches() {
    let source_file = csv_file("Id,Vendor\n1,appel\n2,orange\n");
    let target_file = csv_file("Code,Name,Region\nA,apple,EU\nB,orage,US\nC,banana,EU\n");

    let source = read_csv(source_file.path())
        .unwrap()
        .text_column("Vendor", Side::Source)
        .unwrap();
    let target = read_csv(target_file.path())
        .unwrap()
        .text_column("name", Side::Target)
        .unwrap();

    assert_eq!(source, vec!["appel", "orange"]);
    assert_eq!(target, vec!["apple", "orage", "banana"]);

    let table = Matcher::new(MatchOptions::default())
        .unwrap()
        .resolve(&source, &target)
        .unwrap();
    assert_eq!(table.results[0].best().unwrap().text, "apple");
    assert_eq!(table.results[1].best().unwrap().text, "orage");
}

#[test]
fn test_quoted_fields_keep_commas_and_whitespace() {
    let file = csv_file("Name\n\"Acme, Inc.\"\n\"  padded  \"\n\"\"\n");
    let values = read_csv(file.path())
        .unwrap()
        .text_column("Name", Side::Source)
        .unwrap();
    assert_eq!(values, vec!["Acme, Inc.", "  padded  ", ""]);
}

#[test]
fn test_unknown_column_is_reported() {
    let file = csv_file("Id,Vendor\n1,appel\n");
    let table = read_csv(file.path()).unwrap();
    let err = table.text_column("Supplier", Side::Source).unwrap_err();
    assert!(matches!(err, IngestError::ColumnNotFound { .. }));
}

#[test]
fn test_header_only_file_has_no_rows() {
    let file = csv_file("Id,Vendor\n");
    let table = read_csv(file.path()).unwrap();
    assert!(table.is_empty());
    assert!(table.text_column("Vendor", Side::Source).unwrap().is_empty());
}
