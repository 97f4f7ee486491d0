//! Conversion between nested JSON documents and flat dotted-key entries.
//!
//! `flatten` walks a document in pre-order and emits one entry per leaf;
//! `unflatten` rebuilds the nesting from the dotted keys.

use crate::{Collection, EditorError, Entry, statics};
use serde_json::{Map, Value};

/// Knobs for [`unflatten_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Emit nested objects keyed exactly `"0"..="n-1"` (in that order) as JSON
    /// arrays, so arrays split apart by [`flatten`] come back as arrays. Off by
    /// default: an index-keyed object in the source is indistinguishable from a
    /// split array. The top-level document always stays an object.
    pub restore_arrays: bool,
}

/// Flattens `value` into dotted-path entries in document order.
///
/// Arrays are walked like objects keyed by their indices. Empty objects and
/// arrays produce no entries, and so does a bare scalar document.
pub fn flatten(value: &Value) -> Collection {
    let mut out = Vec::new();
    flatten_into(value, "", &mut out);
    Collection::from_entries(out)
}

/// Parses `text` as strict JSON and flattens it.
///
/// Documents with an empty object key anywhere (`{"": 1}`, `{"a": {"": 1}}`)
/// are rejected with [`EditorError::InvalidKey`], since their dotted paths
/// would contain empty segments.
pub fn parse_and_flatten(text: &str) -> Result<Collection, EditorError> {
    let value: Value = serde_json::from_str(text)?;
    let items = flatten(&value);
    if let Some(bad) = items.iter().find(|e| has_empty_segment(&e.key)) {
        return Err(EditorError::InvalidKey(bad.key.clone()));
    }
    Ok(items)
}

fn has_empty_segment(key: &str) -> bool {
    key.split(statics::KEY_SEPARATOR).any(str::is_empty)
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Vec<Entry>) {
    let mut visit = |key: &str, child: &Value| {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}{}{key}", statics::KEY_SEPARATOR)
        };
        match child {
            Value::Object(_) | Value::Array(_) => flatten_into(child, &path, out),
            leaf => out.push(Entry {
                key: path,
                value: stringify_leaf(leaf),
            }),
        }
    };

    match value {
        Value::Object(map) => {
            for (k, v) in map {
                visit(k, v);
            }
        }
        Value::Array(values) => {
            for (i, v) in values.iter().enumerate() {
                visit(&i.to_string(), v);
            }
        }
        _ => {}
    }
}

/// String form of a scalar leaf.
///
/// Strings are taken verbatim, `null` becomes the text `null`, integers print
/// as decimal and floats use the shortest round-trip form without a
/// trailing `.0`.
pub fn stringify_leaf(value: &Value) -> String {
    match value {
        Value::Null => statics::LITERAL_NULL.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else if let Some(f) = n.as_f64() {
                format_float(f)
            } else {
                n.to_string()
            }
        }
        // Containers are walked by `flatten_into`; only reachable via direct calls.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    let mut buf = ryu::Buffer::new();
    let s = buf.format_finite(f);
    let s = s.strip_suffix(".0").unwrap_or(s);
    // ryu writes `1e21`; keep the explicit sign of `1e+21`.
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s.to_string(),
    }
}

/// Rebuilds a nested document with the default [`ExportOptions`].
pub fn unflatten(entries: &[Entry]) -> Result<Value, EditorError> {
    unflatten_with(entries, ExportOptions::default())
}

/// Rebuilds a nested document from dotted keys. Every leaf is a JSON string.
///
/// A repeated key takes the last value. A key that would need to be both a
/// value and a parent of deeper keys (`a` together with `a.b`, in either
/// order) fails with [`EditorError::StructuralConflict`].
pub fn unflatten_with(entries: &[Entry], options: ExportOptions) -> Result<Value, EditorError> {
    let mut root = Map::new();

    for (idx, entry) in entries.iter().enumerate() {
        let segments: Vec<&str> = entry.key.split(statics::KEY_SEPARATOR).collect();
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };

        let mut current = &mut root;
        for (depth, segment) in parents.iter().enumerate() {
            current = match current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()))
            {
                Value::Object(map) => map,
                _ => {
                    return Err(EditorError::StructuralConflict {
                        key: entry.key.clone(),
                        conflicting: segments[..=depth].join(statics::KEY_SEPARATOR_STR),
                    });
                }
            };
        }

        if let Some(Value::Object(_)) = current.get(*last) {
            let nested_prefix = format!("{}{}", entry.key, statics::KEY_SEPARATOR);
            let conflicting = entries[..idx]
                .iter()
                .find(|e| e.key.starts_with(&nested_prefix))
                .map(|e| e.key.clone())
                .unwrap_or_else(|| nested_prefix.clone());
            return Err(EditorError::StructuralConflict {
                key: entry.key.clone(),
                conflicting,
            });
        }

        current.insert(last.to_string(), Value::String(entry.value.clone()));
    }

    if options.restore_arrays {
        root = root
            .into_iter()
            .map(|(k, v)| (k, restore_arrays(v)))
            .collect();
    }
    Ok(Value::Object(root))
}

fn restore_arrays(value: Value) -> Value {
    let Value::Object(map) = value else {
        return value;
    };

    let map: Map<String, Value> = map
        .into_iter()
        .map(|(k, v)| (k, restore_arrays(v)))
        .collect();

    let is_index_keyed = !map.is_empty()
        && map
            .keys()
            .enumerate()
            .all(|(i, k)| *k == i.to_string());

    if is_index_keyed {
        Value::Array(map.into_iter().map(|(_, v)| v).collect())
    } else {
        Value::Object(map)
    }
}
