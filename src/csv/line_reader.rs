//! Quote-aware logical line reader
//!
//! Splits a byte stream into logical lines. A `\n`, `\r`, `\r\n` or `\n\r`
//! ends a line only when it appears outside a quoted span; terminators inside
//! quotes are kept as data.

use std::io::{self, BufRead};

use super::dialect::{BlankLines, Dialect};
use crate::error::{CsvError, Result};

/// Read position within the byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    line: u64,
    byte: u64,
    record: u64,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            line: 1,
            byte: 0,
            record: 0,
        }
    }
}

impl Position {
    /// Physical line (1-based) of the next unread byte
    ///
    /// `\n`, `\r`, `\r\n` and `\n\r` each count as one line break,
    /// including those embedded in quoted fields.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Number of bytes consumed from the source
    pub fn byte(&self) -> u64 {
        self.byte
    }

    /// Number of logical lines returned so far
    pub fn record(&self) -> u64 {
        self.record
    }
}

/// One record's bytes with the line terminator removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    bytes: Vec<u8>,
    line: u64,
}

impl LogicalLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Physical line (1-based) the record started on
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Accumulator for the record being scanned
#[derive(Debug, Clone)]
struct Scan {
    bytes: Vec<u8>,
    in_quotes: bool,
    start_line: u64,
}

/// The other half of a two-byte line break (`\r\n` or `\n\r`)
fn pair_of(terminator: u8) -> u8 {
    if terminator == b'\r' {
        b'\n'
    } else {
        b'\r'
    }
}

/// Reads logical lines from any [`BufRead`] source
///
/// The reader does not own its source. Each call to [`LineReader::next_line`]
/// borrows the source, consumes exactly the bytes of one record (plus its
/// terminator) and leaves the rest buffered in the source.
///
/// If the source fails partway through a record, the bytes read so far are
/// kept and the next call continues the same record. Call
/// [`LineReader::discard_partial`] before switching to another source.
///
/// # Examples
///
/// ```
/// use csvline::csv::LineReader;
///
/// let mut source = "\"multi\nline\",x\nnext".as_bytes();
/// let mut reader = LineReader::default();
///
/// let first = reader.next_line(&mut source).unwrap().unwrap();
/// assert_eq!(first.as_bytes(), b"\"multi\nline\",x");
///
/// let second = reader.next_line(&mut source).unwrap().unwrap();
/// assert_eq!(second.as_bytes(), b"next");
/// assert_eq!(second.line(), 3);
///
/// assert!(reader.next_line(&mut source).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineReader {
    dialect: Dialect,
    blank_lines: BlankLines,
    position: Position,
    // terminator that opened the last line break; its pair closes it
    last_break: Option<u8>,
    // record interrupted by a source error
    partial: Option<Scan>,
}

impl LineReader {
    pub fn new(dialect: Dialect, blank_lines: BlankLines) -> Self {
        LineReader {
            dialect,
            blank_lines,
            ..Default::default()
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn blank_lines(&self) -> BlankLines {
        self.blank_lines
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Drop a record left unfinished by a source error, along with any
    /// pending line-break state
    pub fn discard_partial(&mut self) {
        self.partial = None;
        self.last_break = None;
    }

    /// Read the next logical line
    ///
    /// Returns `Ok(None)` at end of stream. A final line without terminator
    /// is returned as-is. A record whose quote count is odd at end of input
    /// yields [`CsvError::QuoteMismatch`] and is discarded. Source errors are
    /// returned unchanged inside [`CsvError::Io`] and the record read so far
    /// is resumed by the next call; `Interrupted` is retried.
    pub fn next_line<R: BufRead + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<Option<LogicalLine>> {
        let mut scan = self.partial.take().unwrap_or(Scan {
            bytes: Vec::new(),
            in_quotes: false,
            start_line: self.position.line,
        });

        loop {
            let (used, ended) = {
                let chunk = match source.fill_buf() {
                    Ok(chunk) => chunk,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        self.partial = Some(scan);
                        return Err(CsvError::Io(e));
                    }
                };
                if chunk.is_empty() {
                    return self.finish(scan);
                }
                self.scan_chunk(chunk, &mut scan)
            };
            source.consume(used);
            self.position.byte += used as u64;

            if ended {
                self.position.record += 1;
                return Ok(Some(LogicalLine {
                    bytes: scan.bytes,
                    line: scan.start_line,
                }));
            }
        }
    }

    /// Scan one buffered chunk. Returns the number of bytes to consume and
    /// whether the record ended inside this chunk.
    fn scan_chunk(&mut self, chunk: &[u8], scan: &mut Scan) -> (usize, bool) {
        let quote = self.dialect.quote_char();
        let mut i = 0;

        while i < chunk.len() {
            let b = chunk[i];
            i += 1;
            let line_here = self.position.line;

            if b == b'\n' || b == b'\r' {
                if self.last_break == Some(pair_of(b)) {
                    // second half of a two-byte line break
                    self.last_break = None;
                    if !scan.in_quotes {
                        continue;
                    }
                } else {
                    self.position.line += 1;
                    self.last_break = Some(b);

                    if !scan.in_quotes {
                        if scan.bytes.is_empty() {
                            match self.blank_lines {
                                BlankLines::Skip => continue,
                                BlankLines::Keep => scan.start_line = line_here,
                            }
                        }
                        if chunk.get(i) == Some(&pair_of(b)) {
                            i += 1;
                            self.last_break = None;
                        }
                        return (i, true);
                    }
                }
            } else {
                self.last_break = None;
            }

            if scan.bytes.is_empty() {
                scan.start_line = line_here;
            }
            if b == quote {
                scan.in_quotes = !scan.in_quotes;
            }
            scan.bytes.push(b);
        }

        (i, false)
    }

    fn finish(&mut self, scan: Scan) -> Result<Option<LogicalLine>> {
        self.last_break = None;
        if scan.bytes.is_empty() {
            return Ok(None);
        }
        if scan.in_quotes {
            return Err(CsvError::QuoteMismatch {
                line: scan.start_line,
            });
        }
        self.position.record += 1;
        Ok(Some(LogicalLine {
            bytes: scan.bytes,
            line: scan.start_line,
        }))
    }
}
