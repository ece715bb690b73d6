use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Separator used when joining nested object keys into composite column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    /// Join with `.`, e.g. `user.address.city`
    Dot,
    /// Join with `_`, e.g. `user_address_city`
    Underscore,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Dot => ".",
            Separator::Underscore => "_",
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator::Underscore
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How arrays of primitives (or mixed arrays) are folded into columns.
///
/// Arrays whose elements are all objects are never folded; they always
/// expand into additional rows instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrayHandling {
    /// One column per element, named `key<sep>0`, `key<sep>1`, ...
    Index,
    /// One column per element, named `key[0]`, `key[1]`, ...
    Bracket,
    /// The whole array JSON-encoded into a single string column
    Stringify,
}

impl Default for ArrayHandling {
    fn default() -> Self {
        ArrayHandling::Index
    }
}

/// Opt-in ceilings on the work a single flatten call may do.
///
/// Both are off by default; the algorithm itself never fails without them.
#[derive(Debug, Clone, Default)]
pub struct ResourceLimits {
    /// Maximum object nesting depth the collapse may recurse into
    pub max_nesting: Option<usize>,

    /// Maximum number of output rows across the whole call
    pub max_rows: Option<usize>,
}

/// Configuration for the flattening process
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Separator for composite column names
    pub separator: Separator,

    /// Maximum depth to collapse; deeper objects and arrays are stored as
    /// JSON text under their composite key. `None` means unbounded.
    pub max_depth: Option<usize>,

    /// How primitive/mixed arrays become columns
    pub array_handling: ArrayHandling,

    /// Whether null-valued fields are kept as null cells or omitted
    pub preserve_nulls: bool,

    /// Opt-in resource ceilings
    pub limits: ResourceLimits,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            separator: Separator::default(),
            max_depth: None,
            array_handling: ArrayHandling::default(),
            preserve_nulls: true,
            limits: ResourceLimits::default(),
        }
    }
}

/// A flattened table: an ordered column list plus rows aligned to it.
///
/// Cells are always scalar (null, bool, number or string); nested objects
/// and arrays never survive into a materialized row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularResult {
    /// Deduplicated union of keys across all rows, in first-seen order
    pub columns: Vec<String>,

    /// One entry per output row, each aligned to `columns`
    pub rows: Vec<Vec<Value>>,

    /// How many array-valued fields were expanded away into rows
    pub nested_fields_removed: usize,
}
