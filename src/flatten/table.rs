use serde_json::{Map, Value};
use std::collections::HashSet;

/// Union the key sets of all flat row mappings into one ordered column
/// list and align every row to it, padding absent keys with null.
///
/// Column order is first-seen order across rows: record 1 contributes its
/// keys first, later records append only their novel keys.
pub(crate) fn materialize(flat_rows: Vec<Map<String, Value>>) -> (Vec<String>, Vec<Vec<Value>>) {
    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for row in &flat_rows {
        for key in row.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }

    let rows = flat_rows
        .into_iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    (columns, rows)
}
