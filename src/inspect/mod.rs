//! Structure inspection - describe the shape of parsed JSON
//!
//! This module produces a read-only report of a JSON value: root shape,
//! discovered key paths with the kind of value at each, and the maximum
//! nesting depth. It is a diagnostic for showing what a value looks like
//! before flattening it; the flattener does not depend on it.

pub mod analyzer;

pub use analyzer::{analyze, PathEntry, RootShape, StructureReport};
