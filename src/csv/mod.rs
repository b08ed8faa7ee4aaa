//! Quote-aware CSV tokenizing: logical lines, field splitting and the
//! caching parser built on both

mod dialect;
mod line_reader;
mod parser;
mod splitter;

pub use dialect::{BlankLines, Dialect};
pub use line_reader::{LineReader, LogicalLine, Position};
pub use parser::{CsvParser, ParserState};
pub use splitter::{split_fields, FieldSplitter};
