//! Loading delimited text into a [`Document`](crate::core::document::Document).
//!
//! Tokenization (delimiters, quoting, line terminators) is done by the
//! [`csv`] crate. This module decides what the first row and first column
//! mean, enforces the ragged-row policy and maps every failure onto
//! [`DocumentError`](crate::error::DocumentError).
//!
//! A load is one blocking pass over the whole input: the result is either a
//! complete document or an error, never a partially filled one.
//!
//! # Examples
//!
//! ## Loading a file with default options
//!
//! ```no_run
//! use csvdoc::loader::DocumentBuilder;
//!
//! let doc = DocumentBuilder::new().from_path("weather.csv")?;
//! println!("{} rows", doc.row_count());
//! # Ok::<(), csvdoc::DocumentError>(())
//! ```
//!
//! ## Handling ragged rows
//!
//! ```
//! use csvdoc::{loader::{DocumentBuilder, RaggedRows}, DocumentError};
//!
//! let text = "a,b,c\n1,2,3\n4,5\n";
//!
//! let strict = DocumentBuilder::new().from_text(text);
//! assert!(matches!(strict, Err(DocumentError::MalformedInput(_))));
//!
//! let padded = DocumentBuilder::new()
//!     .ragged_rows(RaggedRows::Pad)
//!     .from_text(text)
//!     .unwrap();
//! assert_eq!(padded.get_string_cell(2, 1).unwrap(), "");
//! ```

/// The builder that configures and runs a load.
pub mod document_builder;

#[doc(inline)]
pub use document_builder::{DocumentBuilder, RaggedRows};
