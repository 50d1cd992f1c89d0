mod common;

use std::{
    env::temp_dir,
    io::{self, ErrorKind},
};

use common::{MockFile, fixture};
use csvdoc::{DocumentError, loader::DocumentBuilder, open_csv};
use tempfile::TempDir;

#[test]
fn nonexistent_path_is_file_not_found() {
    let path = temp_dir().join("csvdoc-missing-file-for-test.csv");

    match open_csv(&path) {
        Err(DocumentError::FileNotFound { path: reported, source }) => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn directory_path_is_file_not_found() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    assert!(matches!(
        open_csv(dir.path()),
        Err(DocumentError::FileNotFound { .. })
    ));
}

#[test]
fn reader_failure_is_malformed_input() {
    let mut file = MockFile::default();
    file.expect_read()
        .returning(|_| Err(io::Error::other("disk unplugged")));

    match DocumentBuilder::new().from_reader(file) {
        Err(DocumentError::MalformedInput(message)) => {
            assert!(message.contains("disk unplugged"), "{}", message);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn failure_mid_read_yields_no_document() {
    let mut file = MockFile::default();
    file.expect_read().times(1).returning(|buf| {
        let chunk = b"a,b\n1,2\n";
        buf[..chunk.len()].copy_from_slice(chunk);
        Ok(chunk.len())
    });
    file.expect_read()
        .returning(|_| Err(io::Error::other("connection reset")));

    assert!(matches!(
        DocumentBuilder::new().from_reader(file),
        Err(DocumentError::MalformedInput(_))
    ));
}

#[test]
fn ragged_row_error_names_the_line() {
    let file = fixture("id,name,score\n1,Alice,90\n2,Bob\n3,Carol,75\n");

    match open_csv(file.path()) {
        Err(DocumentError::MalformedInput(message)) => {
            assert_eq!(message, "record on line 3 has 2 cells, expected 3");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn errors_render_readable_messages() {
    let file = fixture("n\n1\nx\n");
    let doc = open_csv(file.path()).unwrap();

    let err = doc.get_column::<i32>("n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot convert \"x\" at column 0, row 1 to i32: invalid digit found in string"
    );

    let err = doc.get_string_cell(0, 5).unwrap_err();
    assert_eq!(err.to_string(), "row index 5 is out of range (2 rows)");

    let err = doc.get_cell_by_name::<i32>("n", "first").unwrap_err();
    assert_eq!(err.to_string(), "row not found: first");
}

#[test]
fn typed_cell_of_empty_text_is_conversion_error() {
    let file = fixture("a,b\n,2\n");
    let doc = open_csv(file.path()).unwrap();

    assert_eq!(doc.get_string_cell(0, 0).unwrap(), "");
    assert!(matches!(
        doc.get_typed_cell::<f64>(0, 0),
        Err(DocumentError::ConversionError { row: 0, column: 0, .. })
    ));
}
