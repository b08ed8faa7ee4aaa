//! csvline - print the records of a CSV file
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | File I/O error |
//! | 4 | Malformed record (with `--strict`) |

use clap::{Parser, ValueEnum};
use csvline::{BlankLines, CsvError, CsvReader, Dialect, Record};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: u8 = 0;
const EXIT_CONFIG_ERROR: u8 = 1;
const EXIT_IO_ERROR: u8 = 3;
const EXIT_RECORD_ERROR: u8 = 4;

/// What to print for each record
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// The logical line as read, terminator removed
    Line,
    /// One field per output line, indented under a record header
    Fields,
    /// Only the number of fields
    Count,
}

/// Print the records of a CSV file.
#[derive(Parser, Debug)]
#[command(name = "csvline")]
#[command(about = "Read CSV records with quote-aware line and field splitting")]
#[command(version)]
struct Args {
    /// Input file; `-` reads standard input. `.csv.zst` and `.csv.zip`
    /// archives are decompressed
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Field delimiter (single ASCII character)
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Quote character (single ASCII character)
    #[arg(short, long, default_value = "\"")]
    quote: char,

    /// Emit blank lines as empty records instead of skipping them
    #[arg(long)]
    keep_blank_lines: bool,

    /// Treat the first record as a header row
    #[arg(long)]
    has_header: bool,

    /// Print only the field at this index
    #[arg(short, long)]
    field: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "line")]
    output: Output,

    /// Stop at the first malformed record instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn dialect(&self) -> Result<Dialect, CsvError> {
        let delimiter = ascii_byte("delimiter", self.delimiter)?;
        let quote = ascii_byte("quote", self.quote)?;
        Dialect::new(delimiter, quote)
    }
}

fn ascii_byte(what: &str, c: char) -> Result<u8, CsvError> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| CsvError::InvalidDialect(format!("{} must be ASCII, got {:?}", what, c)))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let dialect = match args.dialect() {
        Ok(dialect) => dialect,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let reader = match open(&args) {
        Ok(reader) => reader,
        Err(e) => {
            error!("Failed to open {}: {}", args.input.display(), e);
            return ExitCode::from(EXIT_IO_ERROR);
        }
    };
    let blank_lines = if args.keep_blank_lines {
        BlankLines::Keep
    } else {
        BlankLines::Skip
    };
    let mut reader = reader
        .dialect(dialect)
        .blank_lines(blank_lines)
        .has_header(args.has_header);

    match run(&args, &mut reader) {
        Ok(skipped) => {
            info!(
                rows = reader.row_count(),
                skipped,
                "Finished reading {}",
                args.input.display()
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e @ CsvError::Io(_)) => {
            error!("{}", e);
            ExitCode::from(EXIT_IO_ERROR)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(EXIT_RECORD_ERROR)
        }
    }
}

fn open(args: &Args) -> Result<CsvReader, CsvError> {
    if args.input.as_os_str() == "-" {
        debug!("Reading standard input");
        let stdin: Box<dyn BufRead> = Box::new(io::stdin().lock());
        Ok(CsvReader::from_reader(stdin))
    } else {
        debug!("Opening {}", args.input.display());
        CsvReader::open(&args.input)
    }
}

/// Print every record; returns the number of skipped malformed records
fn run(args: &Args, reader: &mut CsvReader) -> Result<u64, CsvError> {
    let mut out = BufWriter::new(io::stdout().lock());
    let mut skipped = 0;

    loop {
        let record = match reader.read_row() {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(e @ CsvError::Io(_)) => return Err(e),
            Err(e) if args.strict => return Err(e),
            Err(e) => {
                warn!(line = reader.line(), "Skipping record: {}", e);
                skipped += 1;
                continue;
            }
        };

        if let Some(headers) = reader.headers() {
            if reader.row_count() == 1 && args.output == Output::Fields {
                writeln!(out, "# {}", headers.join(" | "))?;
            }
        }

        match write_record(&mut out, args, &record) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(skipped),
            other => other?,
        }
    }

    out.flush()?;
    Ok(skipped)
}

fn write_record<W: Write>(out: &mut W, args: &Args, record: &Record) -> io::Result<()> {
    if let Some(index) = args.field {
        match record.get(index) {
            Some(value) => writeln!(out, "{}", value)?,
            None => warn!(
                line = record.line_number(),
                fields = record.len(),
                "No field at index {}",
                index
            ),
        }
        return Ok(());
    }

    match args.output {
        Output::Line => writeln!(out, "{}", record.as_line()),
        Output::Count => writeln!(out, "{}", record.len()),
        Output::Fields => {
            writeln!(out, "record at line {}:", record.line_number())?;
            for (i, value) in record.iter().enumerate() {
                writeln!(out, "  [{}] {}", i, value)?;
            }
            Ok(())
        }
    }
}
