use std::{any::type_name, collections::HashMap, fmt::Display, str::FromStr};

use csv::StringRecord;
use serde::de::DeserializeOwned;

use crate::{
    core::reference::{CellRef, ColumnRef, RowRef},
    error::{Axis, DocumentError, Result},
};

/// A delimited text file loaded fully into memory.
///
/// A `Document` is built once by a [`DocumentBuilder`](crate::loader::DocumentBuilder)
/// (or [`open_csv`](crate::open_csv)) and never changes afterwards. Every query
/// borrows it immutably, so a document can be shared between threads by
/// reference without any locking.
///
/// # Addressing
///
/// All indices are zero-based and relative to the *data area*:
///
/// - when a header row is present, row 0 is the first line after it;
/// - when a label column is present, column 0 is the first column after it.
///
/// Columns can also be addressed by header name and rows by label, through
/// [`ColumnRef`] and [`RowRef`].
///
/// # Examples
///
/// ```
/// use csvdoc::loader::DocumentBuilder;
///
/// let doc = DocumentBuilder::new()
///     .from_text("Date,Open,Close\n2020-01-01,99.5,100.25\n2020-01-02,100.25,101\n")
///     .unwrap();
///
/// assert_eq!(doc.row_count(), 2);
/// assert_eq!(doc.column_count(), 3);
/// assert_eq!(doc.get_string_cell(0, 1).unwrap(), "2020-01-02");
///
/// let close: Vec<f64> = doc.get_column("Close").unwrap();
/// assert_eq!(close, vec![100.25, 101.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// Column names of the data area, label column excluded.
    headers: Option<StringRecord>,
    /// One label per data row, when a label column is present.
    labels: Option<Vec<String>>,
    /// Data rows, each exactly `column_count` cells wide.
    rows: Vec<StringRecord>,
    column_count: usize,
    column_lookup: HashMap<String, usize>,
    row_lookup: HashMap<String, usize>,
}

impl Document {
    /// Assembles a document from already-normalized parts.
    ///
    /// The loader guarantees that every row, and the header if any, is
    /// `column_count` cells wide and that `labels` has one entry per row.
    pub(crate) fn new(
        headers: Option<StringRecord>,
        labels: Option<Vec<String>>,
        rows: Vec<StringRecord>,
        column_count: usize,
    ) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == column_count));
        debug_assert!(labels.as_ref().is_none_or(|l| l.len() == rows.len()));

        let mut column_lookup = HashMap::new();
        if let Some(headers) = &headers {
            for (index, name) in headers.iter().enumerate() {
                if !name.is_empty() {
                    column_lookup.entry(name.to_string()).or_insert(index);
                }
            }
        }

        let mut row_lookup = HashMap::new();
        if let Some(labels) = &labels {
            for (index, name) in labels.iter().enumerate() {
                row_lookup.entry(name.clone()).or_insert(index);
            }
        }

        Self {
            headers,
            labels,
            rows,
            column_count,
            column_lookup,
            row_lookup,
        }
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data columns (label column excluded).
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_headers(&self) -> bool {
        self.headers.is_some()
    }

    pub fn has_row_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Header names in column order, or an empty list without a header row.
    pub fn column_names(&self) -> Vec<&str> {
        self.headers
            .as_ref()
            .map(|headers| headers.iter().collect())
            .unwrap_or_default()
    }

    /// Row labels in row order, or an empty list without a label column.
    pub fn row_names(&self) -> Vec<&str> {
        self.labels
            .as_ref()
            .map(|labels| labels.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| headers.get(index))
    }

    pub fn row_name(&self, index: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(index))
            .map(String::as_str)
    }

    /// Index of the first column whose header equals `name`. Empty header
    /// names are never matched.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_lookup.get(name).copied()
    }

    /// Index of the first row whose label equals `name`.
    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.row_lookup.get(name).copied()
    }

    /// Resolves a column reference to a checked index.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::ColumnNotFound`] if a name is not in the header
    ///   (always the case for a document loaded without headers)
    /// - [`DocumentError::OutOfRange`] if an index is past the last column
    pub fn resolve_column(&self, column: &ColumnRef) -> Result<usize> {
        match column {
            ColumnRef::Index(index) => self.check_column(*index),
            ColumnRef::Name(name) => self
                .column_index(name)
                .ok_or_else(|| DocumentError::ColumnNotFound(name.clone())),
        }
    }

    /// Resolves a row reference to a checked index.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::RowNotFound`] if a label is unknown
    /// - [`DocumentError::OutOfRange`] if an index is past the last row
    pub fn resolve_row(&self, row: &RowRef) -> Result<usize> {
        match row {
            RowRef::Index(index) => self.check_row(*index),
            RowRef::Name(name) => self
                .row_index(name)
                .ok_or_else(|| DocumentError::RowNotFound(name.clone())),
        }
    }

    /// Returns the cell text, or `None` when the position is out of bounds.
    pub fn cell(&self, at: CellRef) -> Option<&str> {
        self.rows.get(at.row).and_then(|row| row.get(at.column))
    }

    /// Returns the raw text stored at `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfRange`] if either index is outside the
    /// data area. The column is checked first.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvdoc::loader::DocumentBuilder;
    ///
    /// let doc = DocumentBuilder::new().from_text("a,b\n1,2\n").unwrap();
    /// assert_eq!(doc.get_string_cell(1, 0).unwrap(), "2");
    /// assert!(doc.get_string_cell(2, 0).is_err());
    /// assert!(doc.get_string_cell(0, 1).is_err());
    /// ```
    pub fn get_string_cell(&self, column: usize, row: usize) -> Result<&str> {
        let column = self.check_column(column)?;
        let row = self.check_row(row)?;
        Ok(&self.rows[row][column])
    }

    /// Parses the cell at `(column, row)` into `T`.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::OutOfRange`] for an invalid position
    /// - [`DocumentError::ConversionError`] if the text does not parse as `T`
    pub fn get_typed_cell<T>(&self, column: usize, row: usize) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.get_string_cell(column, row)?;
        convert(value, column, row)
    }

    /// Parses a cell addressed by header name and/or row label.
    ///
    /// ```
    /// use csvdoc::loader::DocumentBuilder;
    ///
    /// let doc = DocumentBuilder::new()
    ///     .has_row_labels(true)
    ///     .from_text("Date,Close\n2020-01-01,100.25\n")
    ///     .unwrap();
    ///
    /// let close: f64 = doc.get_cell_by_name("Close", "2020-01-01").unwrap();
    /// assert_eq!(close, 100.25);
    /// ```
    pub fn get_cell_by_name<T>(
        &self,
        column: impl Into<ColumnRef>,
        row: impl Into<RowRef>,
    ) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let column = self.resolve_column(&column.into())?;
        let row = self.resolve_row(&row.into())?;
        convert(&self.rows[row][column], column, row)
    }

    /// Returns every cell of a column as text, in row order.
    pub fn get_string_column(&self, column: impl Into<ColumnRef>) -> Result<Vec<&str>> {
        let column = self.resolve_column(&column.into())?;
        Ok(self.rows.iter().map(|row| &row[column]).collect())
    }

    /// Converts every cell of a column into `T`, in row order.
    ///
    /// The column may be given by index or by header name. Conversion is
    /// all-or-nothing: the first cell that fails to parse aborts the call
    /// and its row is reported in the error.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::ColumnNotFound`] for an unknown header name
    /// - [`DocumentError::OutOfRange`] for an invalid column index
    /// - [`DocumentError::ConversionError`] for the first unparsable cell
    ///
    /// # Examples
    ///
    /// ```
    /// use csvdoc::{loader::DocumentBuilder, DocumentError};
    ///
    /// let doc = DocumentBuilder::new().from_text("x\n1.0\nabc\n").unwrap();
    ///
    /// match doc.get_column::<f64>("x") {
    ///     Err(DocumentError::ConversionError { row, value, .. }) => {
    ///         assert_eq!(row, 1);
    ///         assert_eq!(value, "abc");
    ///     }
    ///     other => panic!("unexpected result: {:?}", other),
    /// }
    /// ```
    pub fn get_column<T>(&self, column: impl Into<ColumnRef>) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let column = self.resolve_column(&column.into())?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, record)| convert(&record[column], column, row))
            .collect()
    }

    /// Like [`get_column`](Self::get_column) but with a caller-supplied
    /// conversion, for formats `FromStr` does not cover. The error returned by
    /// the conversion becomes the `reason` of the resulting
    /// [`DocumentError::ConversionError`].
    ///
    /// ```
    /// use csvdoc::loader::DocumentBuilder;
    ///
    /// let doc = DocumentBuilder::new().from_text("pct\n12%\n7.5%\n").unwrap();
    /// let values: Vec<f64> = doc
    ///     .get_column_with("pct", |s| s.trim_end_matches('%').parse::<f64>())
    ///     .unwrap();
    /// assert_eq!(values, vec![12.0, 7.5]);
    /// ```
    pub fn get_column_with<T, E, F>(&self, column: impl Into<ColumnRef>, f: F) -> Result<Vec<T>>
    where
        E: Display,
        F: Fn(&str) -> std::result::Result<T, E>,
    {
        let column = self.resolve_column(&column.into())?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let value = &record[column];
                f(value).map_err(|error| conversion_error::<T>(value, column, row, error))
            })
            .collect()
    }

    /// Returns every cell of a row as text, in column order.
    pub fn get_string_row(&self, row: impl Into<RowRef>) -> Result<Vec<&str>> {
        let row = self.resolve_row(&row.into())?;
        Ok(self.rows[row].iter().collect())
    }

    /// Converts every cell of a row into `T`, failing on the first bad cell.
    pub fn get_row<T>(&self, row: impl Into<RowRef>) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let row = self.resolve_row(&row.into())?;
        self.rows[row]
            .iter()
            .enumerate()
            .map(|(column, value)| convert(value, column, row))
            .collect()
    }

    /// Deserializes one data row into `D` with serde.
    ///
    /// When the document has a header, struct fields are matched by column
    /// name; otherwise they are filled positionally.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvdoc::loader::DocumentBuilder;
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize, PartialEq)]
    /// struct Quote {
    ///     #[serde(rename = "Close")]
    ///     close: f64,
    ///     #[serde(rename = "Date")]
    ///     date: String,
    /// }
    ///
    /// let doc = DocumentBuilder::new()
    ///     .from_text("Date,Close\n2020-01-01,100.25\n")
    ///     .unwrap();
    ///
    /// let quote: Quote = doc.deserialize_row(0usize).unwrap();
    /// assert_eq!(quote, Quote { close: 100.25, date: "2020-01-01".to_string() });
    /// ```
    pub fn deserialize_row<D: DeserializeOwned>(&self, row: impl Into<RowRef>) -> Result<D> {
        let row = self.resolve_row(&row.into())?;
        self.rows[row]
            .deserialize(self.headers.as_ref())
            .map_err(|error| DocumentError::Deserialize {
                row,
                message: error.to_string(),
            })
    }

    /// Deserializes every data row, in order, failing on the first bad row.
    pub fn deserialize_rows<D: DeserializeOwned>(&self) -> Result<Vec<D>> {
        (0..self.rows.len())
            .map(|row| self.deserialize_row(row))
            .collect()
    }

    fn check_column(&self, index: usize) -> Result<usize> {
        if index < self.column_count {
            Ok(index)
        } else {
            Err(DocumentError::OutOfRange {
                axis: Axis::Column,
                index,
                len: self.column_count,
            })
        }
    }

    fn check_row(&self, index: usize) -> Result<usize> {
        if index < self.rows.len() {
            Ok(index)
        } else {
            Err(DocumentError::OutOfRange {
                axis: Axis::Row,
                index,
                len: self.rows.len(),
            })
        }
    }
}

fn convert<T>(value: &str, column: usize, row: usize) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|error| conversion_error::<T>(value, column, row, error))
}

fn conversion_error<T>(
    value: &str,
    column: usize,
    row: usize,
    reason: impl Display,
) -> DocumentError {
    DocumentError::ConversionError {
        column,
        row,
        value: value.to_string(),
        target: type_name::<T>(),
        reason: reason.to_string(),
    }
}
