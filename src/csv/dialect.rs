//! Delimiter, quote and blank-line configuration

use crate::error::{CsvError, Result};

/// How blank physical lines are handled by the line reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLines {
    /// Terminators seen before any record content are discarded, so blank
    /// lines never produce records
    #[default]
    Skip,
    /// Every blank physical line produces an empty record (zero fields)
    Keep,
}

/// Single-byte delimiter and quote character
///
/// Both bytes must be ASCII, distinct from each other, and neither may be a
/// line terminator. Splitting on ASCII bytes keeps field boundaries on UTF-8
/// character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    delimiter: u8,
    quote_char: u8,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            delimiter: b',',
            quote_char: b'"',
        }
    }
}

impl Dialect {
    /// Create a dialect with custom delimiter and quote character
    ///
    /// # Examples
    ///
    /// ```
    /// use csvline::Dialect;
    ///
    /// let dialect = Dialect::new(b';', b'"').unwrap();
    /// assert_eq!(dialect.delimiter(), b';');
    ///
    /// assert!(Dialect::new(b'\n', b'"').is_err());
    /// ```
    pub fn new(delimiter: u8, quote_char: u8) -> Result<Self> {
        check_byte("delimiter", delimiter)?;
        check_byte("quote character", quote_char)?;
        if delimiter == quote_char {
            return Err(CsvError::InvalidDialect(format!(
                "delimiter and quote character are both {:?}",
                delimiter as char
            )));
        }
        Ok(Dialect {
            delimiter,
            quote_char,
        })
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn quote_char(&self) -> u8 {
        self.quote_char
    }
}

fn check_byte(what: &str, byte: u8) -> Result<()> {
    if !byte.is_ascii() {
        return Err(CsvError::InvalidDialect(format!(
            "{} must be ASCII, got 0x{:02x}",
            what, byte
        )));
    }
    if byte == b'\n' || byte == b'\r' {
        return Err(CsvError::InvalidDialect(format!(
            "{} cannot be a line terminator",
            what
        )));
    }
    Ok(())
}
