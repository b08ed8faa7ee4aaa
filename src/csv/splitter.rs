//! Field splitting for one logical line
//!
//! Fields are separated by unquoted delimiters. Quote characters are kept
//! while scanning and at most one enclosing pair is removed per field once
//! the field is complete. Doubled quotes (`""`) are not treated as an escape.

use std::ops::Range;

use super::dialect::Dialect;

/// Splits logical lines into fields
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSplitter {
    dialect: Dialect,
}

impl FieldSplitter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Byte ranges of each field within `line`, enclosing quotes excluded
    ///
    /// An empty line has no fields. A trailing delimiter produces a final
    /// empty field.
    pub fn spans(&self, line: &[u8]) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        if line.is_empty() {
            return spans;
        }

        let delimiter = self.dialect.delimiter();
        let quote = self.dialect.quote_char();
        let mut in_quotes = false;
        let mut start = 0;

        for (i, &b) in line.iter().enumerate() {
            if b == quote {
                in_quotes = !in_quotes;
            } else if b == delimiter && !in_quotes {
                spans.push(self.strip_quotes(line, start..i));
                start = i + 1;
            }
        }

        // Add last field
        spans.push(self.strip_quotes(line, start..line.len()));
        spans
    }

    /// Split `line` into owned field values
    pub fn split(&self, line: &str) -> Vec<String> {
        self.spans(line.as_bytes())
            .into_iter()
            .map(|span| line[span].to_string())
            .collect()
    }

    fn strip_quotes(&self, line: &[u8], span: Range<usize>) -> Range<usize> {
        let quote = self.dialect.quote_char();
        if span.len() > 1 && line[span.start] == quote && line[span.end - 1] == quote {
            span.start + 1..span.end - 1
        } else {
            span
        }
    }
}

/// Split a line with the default dialect (`,` and `"`)
///
/// # Examples
///
/// ```
/// use csvline::csv::split_fields;
///
/// assert_eq!(split_fields(r#""a,b",c"#), vec!["a,b", "c"]);
/// assert_eq!(split_fields("a,b,"), vec!["a", "b", ""]);
/// assert!(split_fields("").is_empty());
/// ```
pub fn split_fields(line: &str) -> Vec<String> {
    FieldSplitter::default().split(line)
}
