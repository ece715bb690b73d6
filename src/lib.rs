//! # Planish - JSON Flattening Toolkit
//!
//! A unified library for inspecting the structure of nested JSON and
//! flattening it into a flat, tabular row/column form suitable for CSV
//! export.
//!
//! ## Modules
//!
//! - **flatten**: Collapse nested objects into composite columns and expand
//!   arrays of objects into additional rows
//! - **inspect**: Report a value's root shape, key paths and nesting depth
//!
//! ## Quick Start
//!
//! ### Flattening
//!
//! ```rust
//! use planish::flatten::{JsonFlattener, FlattenConfig};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let records = vec![json!({
//!     "id": 1,
//!     "items": [
//!         {"sku": "a"},
//!         {"sku": "b"}
//!     ]
//! })];
//!
//! let flattener = JsonFlattener::new(FlattenConfig::default());
//! let table = flattener.flatten(&records)?;
//!
//! assert_eq!(table.columns, vec!["id", "items_sku"]);
//! assert_eq!(table.rows.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ### Structure inspection
//!
//! ```rust
//! use planish::inspect::analyze;
//! use serde_json::json;
//!
//! let report = analyze(&json!([
//!     {"name": "Alice", "tags": ["a", "b"]}
//! ]));
//!
//! assert_eq!(report.root.to_string(), "array of 1 objects");
//! assert_eq!(report.max_depth, 1);
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::BufRead;

pub mod flatten;
pub mod inspect;

// Re-export commonly used types for convenience
pub use flatten::{
    ArrayHandling, CsvWriter, FlattenConfig, FlattenError, JsonFlattener, JsonLinesWriter,
    ResourceLimits, Separator, TabularResult,
};
pub use inspect::{analyze, PathEntry, RootShape, StructureReport};

/// Main entry point: flatten a stream of newline-delimited JSON records
/// into one table
pub fn flatten_reader<R: BufRead>(reader: R, config: FlattenConfig) -> Result<TabularResult> {
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line).context("Failed to parse JSON")?;
        records.push(value);
    }

    let flattener = JsonFlattener::new(config);
    let table = flattener.flatten(&records)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_reader_ndjson() {
        let input = b"{\"a\": 1}\n\n{\"a\": 2, \"b\": 3}\n" as &[u8];

        let table = flatten_reader(input, FlattenConfig::default()).unwrap();

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], serde_json::Value::Null);
    }

    #[test]
    fn test_flatten_reader_rejects_bad_json() {
        let input = b"{not json}\n" as &[u8];

        let result = flatten_reader(input, FlattenConfig::default());

        assert!(result.is_err());
    }
}
