//! JSON flattening - convert nested JSON into a flat row/column table
//!
//! This module collapses nested objects into composite column names and
//! expands arrays of objects into additional rows, then aligns every row
//! to the union of the produced columns.
//!
//! ## Determinism
//!
//! Object key order drives both the column order and which array field
//! expands first when several are present, so the output is fully
//! deterministic for a given input and configuration.

pub mod error;
pub mod flattener;
pub mod table;
pub mod types;
pub mod writer;

pub use error::FlattenError;
pub use flattener::JsonFlattener;
pub use types::{ArrayHandling, FlattenConfig, ResourceLimits, Separator, TabularResult};
pub use writer::{CsvWriter, JsonLinesWriter};
