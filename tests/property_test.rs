//! Property-based tests for line reading and field splitting

use csvline::csv::{split_fields, LineReader};
use csvline::{BlankLines, CsvError, CsvParser, Dialect};
use proptest::prelude::*;
use std::io::BufReader;

/// Outcome of one `next_line` call, comparable across readers
#[derive(Debug, PartialEq)]
enum Step {
    Line(Vec<u8>, u64),
    QuoteMismatch(u64),
}

fn read_steps<R: std::io::BufRead>(source: R) -> Vec<Step> {
    read_steps_with(source, BlankLines::Skip)
}

fn read_steps_with<R: std::io::BufRead>(mut source: R, blank_lines: BlankLines) -> Vec<Step> {
    let mut reader = LineReader::new(Dialect::default(), blank_lines);
    let mut steps = Vec::new();
    loop {
        match reader.next_line(&mut source) {
            Ok(Some(line)) => {
                let number = line.line();
                steps.push(Step::Line(line.into_bytes(), number));
            }
            Ok(None) => return steps,
            Err(CsvError::QuoteMismatch { line }) => steps.push(Step::QuoteMismatch(line)),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}

/// Byte-at-a-time line splitting with leading terminators skipped
fn reference_lines(input: &[u8]) -> Vec<Option<Vec<u8>>> {
    let mut out = Vec::new();
    let mut i = 0;
    loop {
        let mut line = Vec::new();
        let mut in_quotes = false;
        loop {
            let Some(&b) = input.get(i) else {
                if !line.is_empty() {
                    out.push(if in_quotes { None } else { Some(line) });
                }
                return out;
            };
            i += 1;
            let terminator = b == b'\n' || b == b'\r';
            if line.is_empty() && terminator {
                continue;
            }
            if terminator && !in_quotes {
                if b == b'\r' && input.get(i) == Some(&b'\n') {
                    i += 1;
                }
                out.push(Some(line));
                break;
            }
            if b == b'"' {
                in_quotes = !in_quotes;
            }
            line.push(b);
        }
    }
}

fn csv_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            Just(b'a'),
            Just(b'z'),
            Just(b','),
            Just(b'"'),
            Just(b'\n'),
            Just(b'\r'),
        ],
        0..64,
    )
}

fn plain_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,8}"
}

fn quotable_field() -> impl Strategy<Value = String> {
    "[a-z0-9 ,\n\r]{0,8}"
}

proptest! {
    #[test]
    fn chunk_size_does_not_change_lines(input in csv_bytes(), capacity in 1usize..8) {
        let whole = read_steps(input.as_slice());
        let chunked = read_steps(BufReader::with_capacity(capacity, input.as_slice()));
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn chunk_size_does_not_change_kept_blank_lines(input in csv_bytes(), capacity in 1usize..8) {
        let whole = read_steps_with(input.as_slice(), BlankLines::Keep);
        let chunked = read_steps_with(
            BufReader::with_capacity(capacity, input.as_slice()),
            BlankLines::Keep,
        );
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn matches_byte_at_a_time_reference(input in csv_bytes()) {
        let got: Vec<Option<Vec<u8>>> = read_steps(input.as_slice())
            .into_iter()
            .map(|step| match step {
                Step::Line(bytes, _) => Some(bytes),
                Step::QuoteMismatch(_) => None,
            })
            .collect();
        prop_assert_eq!(got, reference_lines(&input));
    }

    #[test]
    fn lines_never_contain_unquoted_terminators(input in csv_bytes()) {
        for step in read_steps(input.as_slice()) {
            if let Step::Line(bytes, _) = step {
                prop_assert!(!bytes.is_empty());
                let mut in_quotes = false;
                for b in bytes {
                    if b == b'"' {
                        in_quotes = !in_quotes;
                    }
                    prop_assert!(in_quotes || (b != b'\n' && b != b'\r'));
                }
                prop_assert!(!in_quotes);
            }
        }
    }

    #[test]
    fn plain_fields_survive_joining(fields in prop::collection::vec(plain_field(), 1..6)) {
        let line = fields.join(",");
        if line.is_empty() {
            prop_assert!(split_fields(&line).is_empty());
        } else {
            prop_assert_eq!(split_fields(&line), fields);
        }
    }

    #[test]
    fn quoted_fields_read_back(fields in prop::collection::vec(quotable_field(), 1..6)) {
        let line: Vec<String> = fields.iter().map(|f| format!("\"{}\"", f)).collect();
        let input = format!("{}\r\n", line.join(","));

        let mut source = input.as_bytes();
        let mut parser = CsvParser::new();
        parser.read_line(&mut source).unwrap();

        prop_assert_eq!(parser.field_count(), Some(fields.len()));
        for (i, expected) in fields.iter().enumerate() {
            prop_assert_eq!(parser.field(i).unwrap(), expected.as_str());
        }
        prop_assert!(parser.read_line(&mut source).unwrap().is_none());
    }
}
