use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Shape of the analyzed root value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootShape {
    /// Anything that is not an array: one record
    SingleObject,
    /// An array treated as a sequence of records
    ObjectArray { len: usize },
}

impl fmt::Display for RootShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootShape::SingleObject => write!(f, "single object"),
            RootShape::ObjectArray { len } => write!(f, "array of {} objects", len),
        }
    }
}

/// One discovered key path and the kind of value found there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub path: String,
    pub kind: String,
}

/// Read-only description of a JSON value's shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub root: RootShape,
    pub object_count: usize,
    pub max_depth: usize,
    pub paths: Vec<PathEntry>,
}

/// Describe the shape of a parsed JSON value.
///
/// For an array root the first element stands in for the whole sequence,
/// so the report is a structural sample rather than a uniform-schema
/// guarantee. Key paths are joined with `.`; array traversal is marked
/// with a `[]` suffix. Accepts any value and never fails.
pub fn analyze(value: &Value) -> StructureReport {
    let (root, object_count, representative) = match value {
        Value::Array(arr) => (
            RootShape::ObjectArray { len: arr.len() },
            arr.len(),
            arr.first(),
        ),
        other => (RootShape::SingleObject, 1, Some(other)),
    };

    let mut paths = Vec::new();
    let mut max_depth = 0;

    if let Some(Value::Object(obj)) = representative {
        walk(obj, "", 1, &mut paths, &mut max_depth);
    }

    StructureReport {
        root,
        object_count,
        max_depth,
        paths,
    }
}

/// Pre-order walk over the representative object.
///
/// Nested objects recurse without emitting an entry of their own; arrays
/// emit an `Array[n]` entry and, when the first element is an object,
/// recurse exactly one level into it. Consecutive array levels are never
/// descended.
fn walk(
    obj: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    paths: &mut Vec<PathEntry>,
    max_depth: &mut usize,
) {
    for (key, value) in obj {
        let path = join(prefix, key);
        *max_depth = (*max_depth).max(depth);

        match value {
            Value::Object(inner) => {
                walk(inner, &path, depth + 1, paths, max_depth);
            }
            Value::Array(arr) => {
                paths.push(PathEntry {
                    path: path.clone(),
                    kind: format!("Array[{}]", arr.len()),
                });

                if let Some(Value::Object(inner)) = arr.first() {
                    let marked = format!("{}[]", path);
                    walk(inner, &marked, depth + 1, paths, max_depth);
                }
            }
            other => {
                paths.push(PathEntry {
                    path,
                    kind: kind_label(other).to_string(),
                });
            }
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn kind_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_object_report() {
        let report = analyze(&json!({
            "name": "Alice",
            "age": 30,
            "active": true,
            "nickname": null
        }));

        assert_eq!(report.root, RootShape::SingleObject);
        assert_eq!(report.object_count, 1);
        assert_eq!(report.max_depth, 1);

        let kinds: Vec<(&str, &str)> = report
            .paths
            .iter()
            .map(|e| (e.path.as_str(), e.kind.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("name", "string"),
                ("age", "number"),
                ("active", "boolean"),
                ("nickname", "null"),
            ]
        );
    }

    #[test]
    fn test_array_root_uses_first_element() {
        let report = analyze(&json!([
            {"a": 1},
            {"b": 2, "c": 3}
        ]));

        assert_eq!(report.root, RootShape::ObjectArray { len: 2 });
        assert_eq!(report.object_count, 2);
        // Only the first element is walked
        assert_eq!(report.paths.len(), 1);
        assert_eq!(report.paths[0].path, "a");
    }

    #[test]
    fn test_nested_objects_expand_paths() {
        let report = analyze(&json!({
            "user": {"address": {"city": "Lisbon"}}
        }));

        assert_eq!(report.max_depth, 3);
        assert_eq!(report.paths.len(), 1);
        assert_eq!(report.paths[0].path, "user.address.city");
        assert_eq!(report.paths[0].kind, "string");
    }

    #[test]
    fn test_array_of_objects_recurses_one_level() {
        let report = analyze(&json!({
            "posts": [{"title": "x", "tags": [1, 2]}]
        }));

        let kinds: Vec<(&str, &str)> = report
            .paths
            .iter()
            .map(|e| (e.path.as_str(), e.kind.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("posts", "Array[1]"),
                ("posts[].title", "string"),
                ("posts[].tags", "Array[2]"),
            ]
        );
        assert_eq!(report.max_depth, 2);
    }

    #[test]
    fn test_array_of_arrays_not_descended() {
        let report = analyze(&json!({"grid": [[1, 2], [3]]}));

        assert_eq!(report.paths.len(), 1);
        assert_eq!(report.paths[0].path, "grid");
        assert_eq!(report.paths[0].kind, "Array[2]");
        assert_eq!(report.max_depth, 1);
    }

    #[test]
    fn test_empty_containers() {
        let report = analyze(&json!({}));
        assert_eq!(report.max_depth, 0);
        assert!(report.paths.is_empty());

        let report = analyze(&json!([]));
        assert_eq!(report.root, RootShape::ObjectArray { len: 0 });
        assert_eq!(report.object_count, 0);
        assert_eq!(report.max_depth, 0);
        assert!(report.paths.is_empty());
    }

    #[test]
    fn test_scalar_root() {
        let report = analyze(&json!(42));

        assert_eq!(report.root, RootShape::SingleObject);
        assert_eq!(report.object_count, 1);
        assert_eq!(report.max_depth, 0);
        assert!(report.paths.is_empty());
    }

    #[test]
    fn test_root_shape_labels() {
        assert_eq!(RootShape::SingleObject.to_string(), "single object");
        assert_eq!(
            RootShape::ObjectArray { len: 3 }.to_string(),
            "array of 3 objects"
        );
    }
}
