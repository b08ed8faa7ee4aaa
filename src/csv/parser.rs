//! CSV parser caching the most recently read record

use std::io::BufRead;

use super::dialect::{BlankLines, Dialect};
use super::line_reader::{LineReader, Position};
use super::splitter::FieldSplitter;
use crate::error::{CsvError, Result};
use crate::record::Record;

/// Lifecycle of a [`CsvParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Nothing has been read yet
    Initial,
    /// The last read returned a record, or failed; reading may continue
    Ready,
    /// The last read reached end of stream
    Exhausted,
}

/// CSV parser for reading records one logical line at a time
///
/// The parser borrows its byte source only for the duration of each
/// [`read_line`](CsvParser::read_line) call, so the caller stays in charge
/// of opening and closing it. The last record read is cached and can be
/// queried with [`field_count`](CsvParser::field_count) and
/// [`field`](CsvParser::field).
///
/// # Examples
///
/// ```
/// use csvline::CsvParser;
///
/// let mut source = "name,city\n\"Doe, Jane\",Hanoi\n".as_bytes();
/// let mut parser = CsvParser::new();
///
/// assert_eq!(parser.field_count(), None);
///
/// while let Some(record) = parser.read_line(&mut source).unwrap() {
///     println!("{:?}", record.to_strings());
/// }
///
/// // the cache is cleared once the stream is exhausted
/// assert_eq!(parser.field_count(), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct CsvParser {
    reader: LineReader,
    splitter: FieldSplitter,
    state: ParserState,
    has_read_any_line: bool,
    record: Option<Record>,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvParser {
    /// Create a parser with `,` delimiter, `"` quotes and blank lines skipped
    pub fn new() -> Self {
        CsvParser {
            reader: LineReader::default(),
            splitter: FieldSplitter::default(),
            state: ParserState::Initial,
            has_read_any_line: false,
            record: None,
        }
    }

    /// Set delimiter and quote character (builder pattern)
    ///
    /// # Examples
    ///
    /// ```
    /// use csvline::{CsvParser, Dialect};
    ///
    /// let parser = CsvParser::new().dialect(Dialect::new(b';', b'"').unwrap());
    /// ```
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.reader = LineReader::new(dialect, self.reader.blank_lines());
        self.splitter = FieldSplitter::new(dialect);
        self
    }

    /// Set blank line policy (builder pattern)
    pub fn blank_lines(mut self, blank_lines: BlankLines) -> Self {
        self.reader = LineReader::new(self.reader.dialect(), blank_lines);
        self
    }

    /// Read the next record from `source`
    ///
    /// Returns `Ok(None)` at end of stream. On success the new record
    /// replaces the cached one and is returned. On end of stream or error
    /// the cache is cleared; errors are not fatal and reading may resume
    /// on the same or another source.
    pub fn read_line<R: BufRead + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<Option<&Record>> {
        self.record = None;

        let line = match self.reader.next_line(source) {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.state = ParserState::Exhausted;
                return Ok(None);
            }
            Err(e) => {
                self.state = ParserState::Ready;
                return Err(e);
            }
        };

        let line_number = line.line();
        let text = String::from_utf8(line.into_bytes()).map_err(|e| {
            self.state = ParserState::Ready;
            CsvError::Encoding {
                line: line_number,
                source: e.utf8_error(),
            }
        })?;
        let spans = self.splitter.spans(text.as_bytes());

        self.state = ParserState::Ready;
        self.has_read_any_line = true;
        let record = self.record.insert(Record::new(text, spans, line_number));
        Ok(Some(&*record))
    }

    /// Number of fields in the cached record
    ///
    /// Returns `None` if no record has ever been read successfully, and
    /// `Some(0)` after end of stream or a failed read.
    pub fn field_count(&self) -> Option<usize> {
        if !self.has_read_any_line {
            return None;
        }
        Some(self.record.as_ref().map_or(0, Record::len))
    }

    /// Get field at `index` of the cached record, enclosing quotes removed
    pub fn field(&self, index: usize) -> Result<&str> {
        if !self.has_read_any_line {
            return Err(CsvError::InvalidState);
        }
        let record = self.record.as_ref();
        record
            .and_then(|r| r.get(index))
            .ok_or(CsvError::FieldIndexOutOfRange {
                index,
                count: record.map_or(0, Record::len),
            })
    }

    /// The cached record, if the last read produced one
    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Read position of the underlying line reader
    pub fn position(&self) -> Position {
        self.reader.position()
    }

    /// Forget a record left unfinished by an I/O error
    ///
    /// Needed only before reading from a different source; retrying the
    /// same source continues the interrupted record.
    pub fn discard_partial(&mut self) {
        self.reader.discard_partial();
    }
}
