//! Error types for CSV reading

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors produced while reading and accessing CSV records
///
/// End of input is not an error: reading operations return `Ok(None)` once
/// the source is exhausted and no partial record remains.
///
/// Every variant is recoverable. After `QuoteMismatch`, `Encoding` or `Io`
/// the parser can be asked for the next record again, on the same source or
/// on a different one.
#[derive(Error, Debug)]
pub enum CsvError {
    /// A record ended with an odd number of quote characters
    ///
    /// `line` is the 1-based physical line on which the record started.
    /// The offending record is discarded.
    #[error("excess or missing quote in quoted field (record starting at line {line})")]
    QuoteMismatch { line: u64 },

    /// The underlying byte source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A field was requested before any record was successfully read
    #[error("no record has been read yet")]
    InvalidState,

    /// Field index outside `0..count`
    #[error("field index {index} out of range for record with {count} fields")]
    FieldIndexOutOfRange { index: usize, count: usize },

    /// A record is not valid UTF-8
    #[error("record starting at line {line} is not valid UTF-8: {source}")]
    Encoding {
        line: u64,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Rejected delimiter or quote configuration
    #[error("invalid dialect: {0}")]
    InvalidDialect(String),

    /// Failed to open or decompress an input file
    #[error("read error: {0}")]
    ReadError(String),
}
