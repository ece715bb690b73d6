//! planish-flatten: Flatten nested JSON into CSV or JSON Lines
//!
//! Nested objects collapse into composite column names; arrays of objects
//! expand into additional rows.
//!
//! Usage:
//!   # Read from file, output CSV to stdout
//!   planish-flatten data.json
//!
//!   # Read from stdin
//!   echo '{"id": 1, "items": [{"sku": "a"}]}' | planish-flatten
//!
//!   # Process NDJSON, emit JSON Lines
//!   planish-flatten --ndjson events.jsonl --format jsonl
//!
//!   # Dotted column names, stringified arrays, nulls dropped
//!   planish-flatten data.json --separator . --array-handling stringify --drop-nulls

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use planish::flatten::{
    ArrayHandling, CsvWriter, FlattenConfig, JsonFlattener, JsonLinesWriter, Separator,
};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "planish-flatten")]
#[command(about = "Flatten nested JSON into tabular form", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON record per line)
    #[arg(long)]
    ndjson: bool,

    /// Separator for composite column names: "." or "_" (default "_")
    #[arg(long)]
    separator: Option<String>,

    /// Maximum depth to collapse; deeper values become JSON text
    #[arg(long)]
    max_depth: Option<usize>,

    /// How arrays of primitives become columns
    #[arg(long, value_enum)]
    array_handling: Option<ArrayMode>,

    /// Omit null-valued fields instead of emitting null cells
    #[arg(long)]
    drop_nulls: bool,

    /// Fail once this many output rows have been produced
    #[arg(long)]
    max_rows: Option<usize>,

    /// Fail once object nesting exceeds this depth
    #[arg(long)]
    max_nesting: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,

    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArrayMode {
    Index,
    Bracket,
    Stringify,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Jsonl,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Build config
    let mut config = FlattenConfig::default();
    if let Some(sep) = &args.separator {
        config.separator = match sep.as_str() {
            "." => Separator::Dot,
            "_" => Separator::Underscore,
            other => bail!("unsupported separator {:?} (expected \".\" or \"_\")", other),
        };
    }
    config.max_depth = args.max_depth;
    if let Some(mode) = args.array_handling {
        config.array_handling = match mode {
            ArrayMode::Index => ArrayHandling::Index,
            ArrayMode::Bracket => ArrayHandling::Bracket,
            ArrayMode::Stringify => ArrayHandling::Stringify,
        };
    }
    config.preserve_nulls = !args.drop_nulls;
    config.limits.max_rows = args.max_rows;
    config.limits.max_nesting = args.max_nesting;

    let records = read_records(args.input.as_deref(), args.ndjson)?;
    if records.is_empty() {
        eprintln!("Warning: No JSON records found in input");
    }

    let flattener = JsonFlattener::new(config);
    let table = flattener.flatten(&records)?;

    let stdout = std::io::stdout();
    match args.format {
        Format::Csv => {
            let mut writer = CsvWriter::with_delimiter(stdout.lock(), args.delimiter);
            writer.write_table(&table)?;
            writer.flush()?;
        }
        Format::Jsonl => {
            let mut writer = JsonLinesWriter::new(stdout.lock());
            writer.write_table(&table)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// Read input records using SIMD-accelerated JSON parsing when possible.
///
/// A top-level array is treated as the record sequence; any other value
/// becomes a single record.
fn read_records(input_file: Option<&str>, ndjson: bool) -> Result<Vec<Value>> {
    let reader: Box<dyn Read> = if let Some(file_path) = input_file {
        Box::new(BufReader::new(File::open(file_path)?))
    } else {
        Box::new(std::io::stdin())
    };

    let mut content = Vec::new();
    let mut buf_reader = BufReader::new(reader);
    buf_reader.read_to_end(&mut content)?;

    let mut records = Vec::new();

    if ndjson {
        let content_str = String::from_utf8_lossy(&content);
        for line in content_str.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line)?;
            records.push(value);
        }
        return Ok(records);
    }

    // Try SIMD parsing first (faster) - use OwnedValue to avoid borrow issues
    let value: Value = match simd_json::to_owned_value(&mut content) {
        Ok(owned) => {
            let json_str = simd_json::to_string(&owned)?;
            serde_json::from_str(&json_str)?
        }
        Err(_) => {
            // Fallback to serde_json for input simd-json rejects
            let content_str = String::from_utf8_lossy(&content);
            serde_json::from_str(content_str.trim())?
        }
    };

    match value {
        Value::Array(elements) => records.extend(elements),
        other => records.push(other),
    }

    Ok(records)
}
