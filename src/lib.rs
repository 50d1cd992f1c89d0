#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # csvdoc

 Load a delimited text file into an immutable, in-memory table and query it
 by cell, column or row, as raw text or as typed values.

 ## Core Concepts

- **Document:** the whole file, parsed once into rows of string cells. It
  never changes after loading and can be shared between threads by reference.
- **Header row:** an optional first row whose cells name the columns.
- **Label column:** an optional first column whose cells name the rows.
- **DocumentBuilder:** configures delimiter, quoting, header / label handling
  and the policy for ragged rows, then loads from a path, a reader or a string.

 All indices are zero-based and relative to the data area, so the header row
 and label column never count as data.

 ## Getting Started

```rust
use csvdoc::{get_column, get_string_cell, loader::DocumentBuilder, DocumentError};

fn main() -> Result<(), DocumentError> {
    let csv = "Date,Open,Close
2020-01-01,99.5,100.25
2020-01-02,100.25,101";

    let doc = DocumentBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_text(csv)?;

    assert_eq!(get_string_cell(&doc, 0, 1)?, "2020-01-02");

    let close: Vec<f64> = get_column(&doc, "Close")?;
    assert_eq!(close, vec![100.25, 101.0]);

    assert!(matches!(
        get_column::<f64>(&doc, "Volume"),
        Err(DocumentError::ColumnNotFound(_))
    ));

    Ok(())
}
```

 ## Errors

 Every fallible call returns [`DocumentError`]. Loading fails with
 `FileNotFound` or `MalformedInput`; queries fail with `OutOfRange`,
 `ColumnNotFound`, `RowNotFound`, `ConversionError` or `Deserialize`. No call
 ever returns a partial result.

 ## Logging

 The crate emits `debug!`/`trace!` records through the [`log`] facade when a
 document is loaded. Install any `log` implementation to see them.

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

use std::{fmt::Display, path::Path, str::FromStr};

/// Document model and accessors
pub mod core;

/// Error types for loading and querying documents
pub mod error;

#[doc(inline)]
pub use error::*;

/// Loading documents from files, readers and strings
pub mod loader;

#[doc(inline)]
pub use crate::core::{
    document::Document,
    reference::{CellRef, ColumnRef, RowRef},
};

/// Loads `path` with the default options: comma-delimited, first row is a
/// header, no label column, ragged rows rejected.
///
/// # Errors
///
/// [`DocumentError::FileNotFound`] if the file cannot be read and
/// [`DocumentError::MalformedInput`] if it is not well-formed.
pub fn open_csv<P: AsRef<Path>>(path: P) -> Result<Document> {
    loader::DocumentBuilder::new().from_path(path)
}

/// Returns the raw text at `(column_index, row_index)` of `doc`.
///
/// See [`Document::get_string_cell`].
pub fn get_string_cell(doc: &Document, column_index: usize, row_index: usize) -> Result<&str> {
    doc.get_string_cell(column_index, row_index)
}

/// Converts a whole column of `doc`, addressed by index or header name.
///
/// See [`Document::get_column`].
pub fn get_column<T>(doc: &Document, column: impl Into<ColumnRef>) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    doc.get_column(column)
}
