//! The current record: one logical line and its fields

use std::ops::Range;

use crate::csv::{Dialect, FieldSplitter};

/// One CSV record
///
/// A record holds the logical line (terminator removed) and the byte span of
/// each field inside it, so the line and its fields can never disagree.
/// Records are immutable; the parser replaces its record wholesale on every
/// successful read.
///
/// # Examples
///
/// ```
/// use csvline::Record;
///
/// let record = Record::parse(r#"id,"Smith, John",42"#);
/// assert_eq!(record.len(), 3);
/// assert_eq!(record.get(1), Some("Smith, John"));
/// assert_eq!(record.as_line(), r#"id,"Smith, John",42"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    line: String,
    spans: Vec<Range<usize>>,
    line_number: u64,
}

impl Record {
    pub(crate) fn new(line: String, spans: Vec<Range<usize>>, line_number: u64) -> Self {
        Record {
            line,
            spans,
            line_number,
        }
    }

    /// Split a single line with the default dialect
    pub fn parse(line: &str) -> Self {
        Self::parse_with(line, Dialect::default())
    }

    /// Split a single line with a custom dialect
    pub fn parse_with(line: &str, dialect: Dialect) -> Self {
        let spans = FieldSplitter::new(dialect).spans(line.as_bytes());
        Record::new(line.to_string(), spans, 1)
    }

    /// The logical line, quotes included, terminator removed
    pub fn as_line(&self) -> &str {
        &self.line
    }

    /// Physical line (1-based) the record started on
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Number of fields, empty fields included
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Get field at index with enclosing quotes removed
    pub fn get(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|span| &self.line[span.clone()])
    }

    /// Iterate over fields in order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(move |span| &self.line[span.clone()])
    }

    /// Convert record to vector of strings
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for field in self.iter() {
            seq.serialize_element(field)?;
        }
        seq.end()
    }
}
