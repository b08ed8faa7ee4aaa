//! CSV file reading with streaming support and decompression

use crate::csv::{BlankLines, CsvParser, Dialect};
use crate::error::{CsvError, Result};
use crate::record::Record;
use s_zip::StreamingZipReader;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// CSV reader owning its byte source
///
/// Reads records one at a time using an iterator pattern. Plain files are
/// streamed through a buffered reader; ZIP archives (.csv.zst, .csv.zip) are
/// decompressed in memory first. Quoted fields may contain
/// delimiters and line breaks.
///
/// # Examples
///
/// ```no_run
/// use csvline::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// for record in reader.rows() {
///     let record = record.unwrap();
///     println!("{:?}", record.to_strings());
/// }
/// ```
///
/// # With Headers
///
/// ```
/// use csvline::CsvReader;
///
/// let data = "id,name\n1,\"Doe, Jane\"\n";
/// let mut reader = CsvReader::from_reader(data.as_bytes()).has_header(true);
///
/// let record = reader.read_row().unwrap().unwrap();
/// assert_eq!(record.get(1), Some("Doe, Jane"));
/// assert_eq!(reader.headers(), Some(&["id".to_string(), "name".to_string()][..]));
/// ```
pub struct CsvReader<R = Box<dyn BufRead>> {
    source: R,
    parser: CsvParser,
    row_count: u64,
    has_header: bool,
    headers: Option<Vec<String>>,
}

impl CsvReader {
    /// Open CSV file - auto-detects compression from file extension
    ///
    /// # File Extensions
    /// - `.csv.zst`, `.csv.zip` → ZIP archive; the first `.csv` entry is
    ///   decompressed (Zstd or Deflate entries)
    /// - anything else → Uncompressed, direct read
    ///
    /// Bare gzip or zstd streams are not archives and are not supported.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_str().unwrap_or("");

        let source: Box<dyn BufRead> = if path_str.ends_with(".csv.zst")
            || path_str.ends_with(".csv.zip")
        {
            Box::new(Cursor::new(read_compressed(path_ref)?))
        } else {
            let file = File::open(path_ref)
                .map_err(|e| CsvError::ReadError(format!("Failed to open CSV file: {}", e)))?;
            Box::new(BufReader::new(file))
        };

        Ok(CsvReader::from_reader(source))
    }
}

/// Decompress the first `.csv` entry (or the first entry) of an archive
fn read_compressed(path: &Path) -> Result<Vec<u8>> {
    let mut zip = StreamingZipReader::open(path)
        .map_err(|e| CsvError::ReadError(format!("Failed to open ZIP: {}", e)))?;

    let entry_name = zip
        .entries()
        .iter()
        .find(|e| e.name.ends_with(".csv"))
        .or_else(|| zip.entries().first())
        .ok_or_else(|| CsvError::ReadError("No CSV entry found in archive".to_string()))?
        .name
        .clone();

    zip.read_entry_by_name(&entry_name)
        .map_err(|e| CsvError::ReadError(format!("Failed to read ZIP entry: {}", e)))
}

impl<R: BufRead> CsvReader<R> {
    /// Read CSV from any buffered source
    pub fn from_reader(source: R) -> Self {
        CsvReader {
            source,
            parser: CsvParser::new(),
            row_count: 0,
            has_header: false,
            headers: None,
        }
    }

    /// Set custom delimiter and quote character (builder pattern)
    ///
    /// # Examples
    ///
    /// ```
    /// use csvline::{CsvReader, Dialect};
    ///
    /// let mut reader = CsvReader::from_reader("a;b".as_bytes())
    ///     .dialect(Dialect::new(b';', b'"').unwrap());
    /// assert_eq!(reader.read_row().unwrap().unwrap().len(), 2);
    /// ```
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.parser = self.parser.dialect(dialect);
        self
    }

    /// Set blank line policy (builder pattern)
    pub fn blank_lines(mut self, blank_lines: BlankLines) -> Self {
        self.parser = self.parser.blank_lines(blank_lines);
        self
    }

    /// Indicate that the first row contains headers (builder pattern)
    ///
    /// When set to `true`, the first row is stored and accessible via
    /// `headers()` and is not returned as a data row.
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Get header row if it has been read
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Read a single data row
    ///
    /// Returns `Ok(None)` when EOF is reached. Errors leave the reader
    /// usable; the failed record is skipped.
    pub fn read_row(&mut self) -> Result<Option<Record>> {
        if self.has_header && self.headers.is_none() {
            match self.parser.read_line(&mut self.source)? {
                Some(header) => self.headers = Some(header.to_strings()),
                None => return Ok(None),
            }
        }

        let record = self.parser.read_line(&mut self.source)?.cloned();
        if record.is_some() {
            self.row_count += 1;
        }
        Ok(record)
    }

    /// Get iterator over data rows
    pub fn rows(&mut self) -> CsvRowIterator<'_, R> {
        CsvRowIterator { reader: self }
    }

    /// Get the number of data rows read so far
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Physical line the next record starts at or after
    pub fn line(&self) -> u64 {
        self.parser.position().line()
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }
}

/// Iterator over CSV rows
pub struct CsvRowIterator<'a, R> {
    reader: &'a mut CsvReader<R>,
}

impl<'a, R: BufRead> Iterator for CsvRowIterator<'a, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}
