use crate::flatten::error::FlattenError;
use crate::flatten::table;
use crate::flatten::types::{ArrayHandling, FlattenConfig, TabularResult};
use serde_json::{Map, Value};

/// The core flattener that converts nested JSON records into one flat table.
///
/// Each record is first collapsed into a single level of composite keys.
/// Any array-of-objects field survives the collapse untouched and is then
/// expanded into additional rows, one per element, repeatedly until no
/// array fields remain. Finally all rows are aligned to the union of the
/// keys they produced.
pub struct JsonFlattener {
    config: FlattenConfig,
}

impl JsonFlattener {
    pub fn new(config: FlattenConfig) -> Self {
        JsonFlattener { config }
    }

    /// Flatten a sequence of records into a single table.
    ///
    /// A record that is not an object is wrapped as `{"value": record}` so
    /// a bare scalar becomes a single-column row and a bare array follows
    /// the normal array rules under the `value` key.
    pub fn flatten(&self, records: &[Value]) -> Result<TabularResult, FlattenError> {
        let mut flat_rows: Vec<Map<String, Value>> = Vec::new();
        let mut removed = 0usize;

        for record in records {
            let base = match record {
                Value::Object(obj) => self.collapse_object(obj, "", 1)?,
                other => {
                    let mut wrapper = Map::new();
                    wrapper.insert("value".to_string(), other.clone());
                    self.collapse_object(&wrapper, "", 1)?
                }
            };

            self.expand_row(base, &mut flat_rows, &mut removed)?;
        }

        let (columns, rows) = table::materialize(flat_rows);

        Ok(TabularResult {
            columns,
            rows,
            nested_fields_removed: removed,
        })
    }

    /// Collapse one object into a flat mapping of composite keys.
    ///
    /// Arrays whose elements are all objects pass through unchanged; they
    /// are the signal for `expand_row` to multiply rows afterwards. `depth`
    /// is 1-based: the root object's own fields sit at depth 1.
    fn collapse_object(
        &self,
        obj: &Map<String, Value>,
        prefix: &str,
        depth: usize,
    ) -> Result<Map<String, Value>, FlattenError> {
        if let Some(limit) = self.config.limits.max_nesting {
            if depth > limit {
                return Err(FlattenError::NestingLimitExceeded { depth, limit });
            }
        }

        let mut flat = Map::new();

        for (key, value) in obj {
            let composite = self.composite_key(prefix, key);

            match value {
                Value::Null => {
                    if self.config.preserve_nulls {
                        flat.insert(composite, Value::Null);
                    }
                }
                Value::Array(arr) => {
                    if self.depth_exhausted(depth) {
                        // Collapse stops here regardless of element type
                        flat.insert(composite, Value::String(value.to_string()));
                    } else if is_object_array(arr) {
                        flat.insert(composite, value.clone());
                    } else {
                        self.collapse_array(arr, &composite, &mut flat);
                    }
                }
                Value::Object(inner) => {
                    if self.depth_exhausted(depth) {
                        flat.insert(composite, Value::String(value.to_string()));
                    } else {
                        let nested = self.collapse_object(inner, &composite, depth + 1)?;
                        flat.extend(nested);
                    }
                }
                scalar => {
                    flat.insert(composite, scalar.clone());
                }
            }
        }

        Ok(flat)
    }

    /// Fold a primitive or mixed array into columns per the configured mode
    fn collapse_array(&self, arr: &[Value], composite: &str, flat: &mut Map<String, Value>) {
        match self.config.array_handling {
            ArrayHandling::Stringify => {
                let encoded = Value::Array(arr.to_vec()).to_string();
                flat.insert(composite.to_string(), Value::String(encoded));
            }
            ArrayHandling::Bracket => {
                for (idx, element) in arr.iter().enumerate() {
                    flat.insert(format!("{}[{}]", composite, idx), scalar_cell(element));
                }
            }
            ArrayHandling::Index => {
                let sep = self.config.separator.as_str();
                for (idx, element) in arr.iter().enumerate() {
                    flat.insert(format!("{}{}{}", composite, sep, idx), scalar_cell(element));
                }
            }
        }
    }

    /// Expand remaining array-valued fields into extra rows.
    ///
    /// Only the first array field (in key order) is expanded per pass;
    /// further array fields, including any introduced by the expanded
    /// elements themselves, are handled by the recursive calls. Key order
    /// is the committed tie-break for which field expands first, so the
    /// produced row order is deterministic.
    fn expand_row(
        &self,
        mut base: Map<String, Value>,
        out: &mut Vec<Map<String, Value>>,
        removed: &mut usize,
    ) -> Result<(), FlattenError> {
        let pending: Vec<String> = base
            .iter()
            .filter(|(_, value)| value.is_array())
            .map(|(key, _)| key.clone())
            .collect();

        let Some(first) = pending.first() else {
            return self.push_row(base, out);
        };

        // Every pass counts its own discoveries; siblings left for later
        // passes are counted again when those passes find them.
        *removed += pending.len();

        let elements = match base.shift_remove(first.as_str()) {
            Some(Value::Array(elements)) => elements,
            _ => Vec::new(),
        };

        for element in elements {
            let mut row = base.clone();
            match element {
                Value::Object(inner) => {
                    // Element keys win over base keys on collision
                    let nested = self.collapse_object(&inner, first, 1)?;
                    row.extend(nested);
                }
                scalar => {
                    row.insert(first.clone(), scalar_cell(&scalar));
                }
            }
            self.expand_row(row, out, removed)?;
        }

        Ok(())
    }

    fn push_row(
        &self,
        row: Map<String, Value>,
        out: &mut Vec<Map<String, Value>>,
    ) -> Result<(), FlattenError> {
        if let Some(limit) = self.config.limits.max_rows {
            if out.len() >= limit {
                return Err(FlattenError::RowLimitExceeded {
                    produced: out.len() + 1,
                    limit,
                });
            }
        }
        out.push(row);
        Ok(())
    }

    fn composite_key(&self, prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}{}{}", prefix, self.config.separator.as_str(), key)
        }
    }

    fn depth_exhausted(&self, depth: usize) -> bool {
        self.config.max_depth.map_or(false, |limit| depth >= limit)
    }
}

/// Check if an array should expand into rows: non-empty and all objects
fn is_object_array(arr: &[Value]) -> bool {
    !arr.is_empty() && arr.iter().all(|v| matches!(v, Value::Object(_)))
}

/// Coerce one array element into a cell value. Scalars are kept as-is;
/// a container element in a mixed array is stored as JSON text so no
/// structure ever reaches a materialized row.
fn scalar_cell(element: &Value) -> Value {
    match element {
        Value::Object(_) | Value::Array(_) => Value::String(element.to_string()),
        other => other.clone(),
    }
}
