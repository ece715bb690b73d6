//! planish-inspect: Describe the structure of nested JSON
//!
//! Reports the root shape, the key paths discovered in the (first) record
//! with the kind of value at each, and the maximum nesting depth.
//!
//! Usage:
//!   # Read from file, output to stdout
//!   planish-inspect data.json
//!
//!   # Read from stdin
//!   echo '{"id": 1, "items": [{"sku": "a"}]}' | planish-inspect
//!
//!   # Treat NDJSON lines as one record sequence
//!   planish-inspect --ndjson events.jsonl
//!
//!   # Human-readable summary instead of JSON
//!   planish-inspect data.json --summary

use anyhow::Result;
use clap::Parser;
use planish::inspect::analyze;
use serde_json::Value;
use std::fs::File;
use std::io::{stdin, BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "planish-inspect")]
#[command(about = "Describe the structure of nested JSON", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON record per line)
    #[arg(long)]
    ndjson: bool,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut content = String::new();
    if let Some(file_path) = &args.input {
        BufReader::new(File::open(file_path)?).read_to_string(&mut content)?;
    } else {
        stdin().read_to_string(&mut content)?;
    }

    let value: Value = if args.ndjson {
        // NDJSON lines form one record sequence; the report then covers
        // the stream with the first line as its representative
        let mut records = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            records.push(serde_json::from_str(line)?);
        }
        Value::Array(records)
    } else {
        serde_json::from_str(content.trim())?
    };

    let report = analyze(&value);

    if args.summary {
        println!("root: {}", report.root);
        println!("max depth: {}", report.max_depth);
        for entry in &report.paths {
            println!("  {} ({})", entry.path, entry.kind);
        }
        return Ok(());
    }

    let output = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };

    println!("{}", output);

    Ok(())
}
