use csv::{ErrorKind, ReaderBuilder, StringRecord, Terminator, Trim};
use log::{debug, trace};
use std::{
    fmt,
    fs::File,
    io::Read,
    path::Path,
};

use crate::{
    core::document::Document,
    error::{DocumentError, Result},
};

/// What the loader does with rows whose cell count differs from the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RaggedRows {
    /// Fail with [`DocumentError::MalformedInput`] on the first row whose
    /// width differs from the first row (header included).
    #[default]
    Reject,
    /// Pad every short row, header included, with empty cells up to the
    /// width of the widest row. Padded header cells have an empty name and
    /// can only be addressed by index.
    Pad,
}

/// Where the bytes of a document came from, kept for error mapping and logs.
enum Source<'a> {
    Path(&'a Path),
    Reader,
}

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Reader => write!(f, "<reader>"),
        }
    }
}

/// A builder for loading a [`Document`].
///
/// This builder lets you customize how delimited text is split into cells
/// and how the first row and first column are interpreted. Each method
/// returns `self` so calls can be chained, and a terminal `from_*` method
/// reads the whole input and returns the loaded document.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Terminator: CRLF (accepts `\r`, `\n` and `\r\n`)
/// - Quote: double quote (")
/// - Headers: enabled
/// - Row labels: disabled
/// - Trimming: none, cells keep their exact text
/// - Comments: none
/// - Ragged rows: rejected
///
/// # Examples
///
/// ```
/// use csvdoc::loader::{DocumentBuilder, RaggedRows};
///
/// let doc = DocumentBuilder::new()
///     .delimiter(b';')
///     .has_row_labels(true)
///     .ragged_rows(RaggedRows::Pad)
///     .from_text("day;min;max\nmon;3;11\ntue;4\n")
///     .unwrap();
///
/// assert_eq!(doc.column_names(), vec!["min", "max"]);
/// assert_eq!(doc.row_names(), vec!["mon", "tue"]);
/// assert_eq!(doc.get_string_cell(1, 1).unwrap(), "");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    delimiter: u8,
    terminator: Terminator,
    quote: u8,
    has_headers: bool,
    has_row_labels: bool,
    trim: Trim,
    comment: Option<u8>,
    ragged_rows: RaggedRows,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates a new `DocumentBuilder` with the default configuration.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::CRLF,
            quote: b'"',
            has_headers: true,
            has_row_labels: false,
            trim: Trim::None,
            comment: None,
            ragged_rows: RaggedRows::Reject,
        }
    }

    /// Sets the field delimiter.
    ///
    /// ```
    /// use csvdoc::loader::DocumentBuilder;
    ///
    /// let doc = DocumentBuilder::new()
    ///     .delimiter(b'\t')
    ///     .from_text("a\tb\n1\t2\n")
    ///     .unwrap();
    /// assert_eq!(doc.get_string_cell(1, 0).unwrap(), "2");
    /// ```
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the record terminator.
    ///
    /// `Terminator::CRLF` (the default) treats `\r`, `\n` and `\r\n` as line
    /// ends; `Terminator::Any(byte)` uses a single custom byte.
    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Sets the quote character used to wrap cells containing delimiters or
    /// line breaks.
    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Sets whether the first row holds column names.
    ///
    /// When enabled, the first row is not part of the data and its cells
    /// become the names accepted by name-based column lookups.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Sets whether the first column holds row labels.
    ///
    /// When enabled, the first cell of every row is not part of the data and
    /// becomes the name accepted by label-based row lookups. The header cell
    /// above the labels, if any, is dropped.
    pub fn has_row_labels(mut self, yes: bool) -> Self {
        self.has_row_labels = yes;
        self
    }

    /// Sets whitespace trimming.
    ///
    /// `Trim::Headers` trims only the header names, `Trim::Fields` only the
    /// data cells (row labels included) and `Trim::All` both.
    pub fn trim(mut self, trim: Trim) -> Self {
        self.trim = trim;
        self
    }

    /// Skips lines starting with the given byte.
    pub fn comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    /// Sets the policy for rows with inconsistent cell counts.
    pub fn ragged_rows(mut self, policy: RaggedRows) -> Self {
        self.ragged_rows = policy;
        self
    }

    /// Loads a document from a file path.
    ///
    /// The file is opened, read to the end and closed before this method
    /// returns, whether loading succeeds or not.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::FileNotFound`] if the file cannot be opened or read
    /// - [`DocumentError::MalformedInput`] for ragged rows (under
    ///   [`RaggedRows::Reject`]) or invalid UTF-8
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvdoc::loader::DocumentBuilder;
    ///
    /// let doc = DocumentBuilder::new()
    ///     .has_headers(true)
    ///     .from_path("prices.csv")?;
    ///
    /// let close: Vec<f32> = doc.get_column("Close")?;
    /// println!("Read {} values.", close.len());
    /// # Ok::<(), csvdoc::DocumentError>(())
    /// ```
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DocumentError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(file, Source::Path(path))
    }

    /// Loads a document from any source implementing `Read`.
    ///
    /// An I/O failure of the source is reported as
    /// [`DocumentError::MalformedInput`].
    ///
    /// ```
    /// use csvdoc::loader::DocumentBuilder;
    /// use std::io::Cursor;
    ///
    /// let doc = DocumentBuilder::new()
    ///     .from_reader(Cursor::new("id,name\n1,Alice\n2,Bob"))
    ///     .unwrap();
    /// assert_eq!(doc.get_string_column("name").unwrap(), vec!["Alice", "Bob"]);
    /// ```
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<Document> {
        self.load(rdr, Source::Reader)
    }

    /// Loads a document from text already in memory.
    pub fn from_text(self, text: &str) -> Result<Document> {
        self.load(text.as_bytes(), Source::Reader)
    }

    fn load<R: Read>(self, rdr: R, source: Source<'_>) -> Result<Document> {
        // The header is read as an ordinary record and split off below, after
        // width checks and padding. Trimming happens after the split since
        // headers and fields are trimmed independently.
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .quote(self.quote)
            .comment(self.comment)
            .has_headers(false)
            .flexible(self.ragged_rows == RaggedRows::Pad)
            .from_reader(rdr);

        let mut records = rdr
            .records()
            .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()
            .map_err(|error| to_document_error(error, &source))?;

        if self.ragged_rows == RaggedRows::Pad {
            pad_records(&mut records);
        }

        let mut records = records.into_iter();
        let trim_fields = matches!(self.trim, Trim::Fields | Trim::All);
        let headers = if self.has_headers {
            let mut header = records.next().unwrap_or_default();
            if matches!(self.trim, Trim::Headers | Trim::All) {
                header.trim();
            }
            Some(header)
        } else {
            None
        };

        let records = records.map(|mut record| {
            if trim_fields {
                record.trim();
            }
            record
        });

        let (headers, labels, rows) = if self.has_row_labels {
            let headers = headers.map(|header| split_label(&header).1);
            let (labels, rows): (Vec<String>, Vec<StringRecord>) =
                records.map(|record| split_label(&record)).unzip();
            (headers, Some(labels), rows)
        } else {
            (headers, None, records.collect())
        };

        let column_count = headers
            .as_ref()
            .or(rows.first())
            .map_or(0, StringRecord::len);

        debug!(
            "Loaded {} rows x {} columns from {}",
            rows.len(),
            column_count,
            source
        );

        Ok(Document::new(headers, labels, rows, column_count))
    }
}

/// Splits a record into its leading label and the remaining cells.
fn split_label(record: &StringRecord) -> (String, StringRecord) {
    let mut cells = record.iter();
    let label = cells.next().unwrap_or_default().to_string();
    (label, cells.collect())
}

fn pad_records(records: &mut [StringRecord]) {
    let width = records.iter().map(StringRecord::len).max().unwrap_or(0);
    for (index, record) in records.iter_mut().enumerate() {
        if record.len() < width {
            trace!(
                "Padding record {} from {} to {} cells",
                index,
                record.len(),
                width
            );
            while record.len() < width {
                record.push_field("");
            }
        }
    }
}

fn to_document_error(error: csv::Error, source: &Source<'_>) -> DocumentError {
    let message = error.to_string();
    match error.into_kind() {
        ErrorKind::Io(io_error) => match source {
            Source::Path(path) => DocumentError::FileNotFound {
                path: path.to_path_buf(),
                source: io_error,
            },
            Source::Reader => DocumentError::MalformedInput(format!("read failed: {}", io_error)),
        },
        ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.map_or_else(|| "?".to_string(), |pos| pos.line().to_string());
            DocumentError::MalformedInput(format!(
                "record on line {} has {} cells, expected {}",
                line, len, expected_len
            ))
        }
        ErrorKind::Utf8 { pos, err } => {
            let line = pos.map_or_else(|| "?".to_string(), |pos| pos.line().to_string());
            DocumentError::MalformedInput(format!(
                "invalid UTF-8 in record on line {}: {}",
                line, err
            ))
        }
        _ => DocumentError::MalformedInput(message),
    }
}

#[cfg(test)]
mod tests {
    use csv::{Terminator, Trim};

    use super::{DocumentBuilder, RaggedRows, Source, to_document_error};
    use crate::error::DocumentError;

    #[test]
    fn defaults_treat_first_row_as_header() {
        let doc = DocumentBuilder::new()
            .from_text("Date,Close\n2020-01-01,100.25\n")
            .unwrap();

        assert!(doc.has_headers());
        assert!(!doc.has_row_labels());
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.column_names(), vec!["Date", "Close"]);
        assert_eq!(doc.get_string_cell(0, 0).unwrap(), "2020-01-01");
    }

    #[test]
    fn without_headers_every_row_is_data() {
        let doc = DocumentBuilder::new()
            .has_headers(false)
            .from_text("1,2\n3,4\n")
            .unwrap();

        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.get_column::<i32>(1usize).unwrap(), vec![2, 4]);
    }

    #[test]
    fn row_labels_are_split_from_data() {
        let doc = DocumentBuilder::new()
            .has_row_labels(true)
            .from_text("Date,Open,Close\n2020-01-01,99.5,100.25\n2020-01-02,100.25,101\n")
            .unwrap();

        assert_eq!(doc.column_count(), 2);
        assert_eq!(doc.column_names(), vec!["Open", "Close"]);
        assert_eq!(doc.row_names(), vec!["2020-01-01", "2020-01-02"]);
        assert_eq!(doc.get_string_cell(0, 0).unwrap(), "99.5");
        assert_eq!(doc.row_index("2020-01-02"), Some(1));
    }

    #[test]
    fn cells_keep_exact_text_by_default() {
        let doc = DocumentBuilder::new()
            .from_text("a,b\n  spaced , x\n")
            .unwrap();
        assert_eq!(doc.get_string_cell(0, 0).unwrap(), "  spaced ");
    }

    #[test]
    fn trim_all_strips_whitespace() {
        let doc = DocumentBuilder::new()
            .trim(Trim::All)
            .from_text(" a , b \n 1.5 , 2 \n")
            .unwrap();
        assert_eq!(doc.column_names(), vec!["a", "b"]);
        assert_eq!(doc.get_column::<f64>("a").unwrap(), vec![1.5]);
    }

    #[test]
    fn trim_headers_leaves_fields_untouched() {
        let doc = DocumentBuilder::new()
            .trim(Trim::Headers)
            .from_text(" a , b \n 1 , 2 \n")
            .unwrap();
        assert_eq!(doc.column_names(), vec!["a", "b"]);
        assert_eq!(doc.column_index("a"), Some(0));
        assert_eq!(doc.get_string_column("b").unwrap(), vec![" 2 "]);
    }

    #[test]
    fn trim_fields_leaves_headers_untouched() {
        let doc = DocumentBuilder::new()
            .trim(Trim::Fields)
            .from_text(" a , b \n 1 , 2 \n")
            .unwrap();
        assert_eq!(doc.column_names(), vec![" a ", " b "]);
        assert_eq!(doc.column_index("a"), None);
        assert_eq!(doc.get_column::<i32>(" b ").unwrap(), vec![2]);
    }

    #[test]
    fn trim_fields_applies_to_row_labels() {
        let doc = DocumentBuilder::new()
            .has_row_labels(true)
            .trim(Trim::Fields)
            .from_text("day,max\n mon ,11\n")
            .unwrap();
        assert_eq!(doc.row_names(), vec!["mon"]);
    }

    #[test]
    fn padded_header_cells_are_not_names() {
        let doc = DocumentBuilder::new()
            .ragged_rows(RaggedRows::Pad)
            .from_text("a\n1,2\n")
            .unwrap();
        assert_eq!(doc.column_names(), vec!["a", ""]);
        assert!(matches!(
            doc.get_column::<i32>(""),
            Err(DocumentError::ColumnNotFound(_))
        ));
        assert_eq!(doc.get_column::<i32>(1usize).unwrap(), vec![2]);
    }

    #[test]
    fn quoted_cells_keep_delimiters_and_newlines() {
        let doc = DocumentBuilder::new()
            .from_text("name,note\n\"Smith, J\",\"line one\nline two\"\n")
            .unwrap();
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.get_string_cell(0, 0).unwrap(), "Smith, J");
        assert_eq!(doc.get_string_cell(1, 0).unwrap(), "line one\nline two");
    }

    #[test]
    fn custom_terminator() {
        let doc = DocumentBuilder::new()
            .terminator(Terminator::Any(b'|'))
            .from_text("k,v|a,1|b,2|")
            .unwrap();
        assert_eq!(doc.get_string_column("k").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn comment_lines_are_skipped() {
        let doc = DocumentBuilder::new()
            .comment(Some(b'#'))
            .from_text("k,v\n# exported by hand\na,1\nb,2\n")
            .unwrap();
        assert_eq!(doc.get_column::<u8>("v").unwrap(), vec![1, 2]);
    }

    #[test]
    fn ragged_rows_are_rejected_by_default() {
        let result = DocumentBuilder::new().from_text("a,b\n1,2\n3\n");
        match result {
            Err(DocumentError::MalformedInput(message)) => {
                assert!(message.contains("line 3"), "{}", message);
                assert!(message.contains("has 1 cells, expected 2"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn ragged_rows_can_be_padded() {
        let doc = DocumentBuilder::new()
            .ragged_rows(RaggedRows::Pad)
            .from_text("a,b\n1\n2,3,4\n")
            .unwrap();

        assert_eq!(doc.column_count(), 3);
        assert_eq!(doc.column_names(), vec!["a", "b", ""]);
        assert_eq!(doc.get_string_row(0usize).unwrap(), vec!["1", "", ""]);
        assert_eq!(doc.get_string_row(1usize).unwrap(), vec!["2", "3", "4"]);
    }

    #[test]
    fn empty_input_gives_empty_document() {
        let doc = DocumentBuilder::new().from_text("").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.column_count(), 0);
        assert!(doc.column_names().is_empty());
    }

    #[test]
    fn header_only_input_has_columns_but_no_rows() {
        let doc = DocumentBuilder::new().from_text("Date,Close\n").unwrap();
        assert_eq!(doc.column_count(), 2);
        assert_eq!(doc.row_count(), 0);
        assert_eq!(doc.get_column::<f64>("Close").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"a,b\n\xff,1\n";
        let result = DocumentBuilder::new().from_reader(bytes);
        assert!(matches!(result, Err(DocumentError::MalformedInput(_))));
    }

    #[test]
    fn other_csv_errors_keep_their_display_text() {
        let error = csv::StringRecord::from(vec!["x"])
            .deserialize::<i32>(None)
            .unwrap_err();
        let expected = error.to_string();

        match to_document_error(error, &Source::Reader) {
            DocumentError::MalformedInput(message) => assert_eq!(message, expected),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let result = DocumentBuilder::new().from_path("/definitely/not/here.csv");
        assert!(matches!(result, Err(DocumentError::FileNotFound { .. })));
    }
}
