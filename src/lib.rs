//! # csvline
//!
//! Streaming CSV reader built around a quote-aware tokenizer.
//!
//! Records are read one logical line at a time from any [`std::io::BufRead`]
//! source. A quoted field may contain delimiters and line breaks; `\n`, `\r`,
//! `\r\n` and `\n\r` terminators may be mixed in one stream, and the last line needs
//! no terminator. At most one enclosing pair of quotes is removed from each
//! field. Doubled quotes (`""`) are not an escape sequence.
//!
//! ## Quick Start
//!
//! ```
//! use csvline::{CsvParser, CsvError};
//!
//! let mut source = "id,comment\n1,\"multi\nline, with comma\"\n2,plain".as_bytes();
//! let mut parser = CsvParser::new();
//!
//! parser.read_line(&mut source)?;
//! assert_eq!(parser.field(1)?, "comment");
//!
//! parser.read_line(&mut source)?;
//! assert_eq!(parser.field_count(), Some(2));
//! assert_eq!(parser.field(1)?, "multi\nline, with comma");
//!
//! parser.read_line(&mut source)?;
//! assert_eq!(parser.field(0)?, "2");
//!
//! assert!(parser.read_line(&mut source)?.is_none());
//! # Ok::<(), CsvError>(())
//! ```
//!
//! For files, [`CsvReader`] owns the source, handles compressed input and an
//! optional header row:
//!
//! ```no_run
//! use csvline::CsvReader;
//!
//! let mut reader = CsvReader::open("data.csv.zst")?.has_header(true);
//! for record in reader.rows() {
//!     println!("{:?}", record?.to_strings());
//! }
//! # Ok::<(), csvline::CsvError>(())
//! ```

pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod record;

pub use csv::{BlankLines, CsvParser, Dialect, ParserState};
pub use csv_reader::CsvReader;
pub use error::{CsvError, Result};
pub use record::Record;
