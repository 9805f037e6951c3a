//! Dot-path operations on nested JSON trees.
//!
//! All functions treat the tree as immutable: `set` and `remove` return a
//! new tree and never touch the input, so a caller holding a reference for
//! display or preview keeps seeing a consistent snapshot.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{PathError, Result};

/// Split a dotted path into its segments.
///
/// # Errors
///
/// Returns `PathError::Empty` for an empty path and
/// `PathError::EmptySegment` when two dots are adjacent or the path starts
/// or ends with a dot.
pub fn split(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(PathError::Empty.into());
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PathError::EmptySegment(path.to_string()).into());
    }
    Ok(segments)
}

/// Look up the node at `path`.
///
/// Returns `None` the moment an intermediate segment is missing or resolves
/// to a leaf while segments remain. The returned node may be a leaf or a
/// whole subtree.
pub fn get<'a>(tree: &'a Value, path: &str) -> Result<Option<&'a Value>> {
    let mut node = tree;
    for segment in split(path)? {
        match node {
            Value::Object(map) => match map.get(segment) {
                Some(next) => node = next,
                None => return Ok(None),
            },
            _ => return Ok(None),
        }
    }
    Ok(Some(node))
}

/// Return a new tree with `value` written at `path`.
///
/// Missing intermediate segments become empty subtrees; an intermediate
/// leaf in the way is replaced by a subtree; the final segment is
/// overwritten regardless of its previous shape. Sibling keys are
/// preserved.
pub fn set(tree: &Value, path: &str, value: Value) -> Result<Value> {
    let segments = split(path)?;
    let root = match tree {
        Value::Object(map) => set_in(map, &segments, value),
        _ => set_in(&Map::new(), &segments, value),
    };
    Ok(Value::Object(root))
}

fn set_in(map: &Map<String, Value>, segments: &[&str], value: Value) -> Map<String, Value> {
    let mut out = map.clone();
    match segments {
        [last] => {
            out.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = match map.get(*head) {
                Some(Value::Object(inner)) => set_in(inner, rest, value),
                _ => set_in(&Map::new(), rest, value),
            };
            out.insert((*head).to_string(), Value::Object(child));
        }
        [] => {}
    }
    out
}

/// Return a new tree with the node at `path` removed.
///
/// Removes the leaf or whole subtree sitting at the exact path. Returns
/// `None` when the path does not exist, in which case the caller must not
/// persist anything.
pub fn remove(tree: &Value, path: &str) -> Result<Option<Value>> {
    let segments = split(path)?;
    let map = match tree {
        Value::Object(map) => map,
        _ => return Ok(None),
    };
    Ok(remove_in(map, &segments).map(Value::Object))
}

fn remove_in(map: &Map<String, Value>, segments: &[&str]) -> Option<Map<String, Value>> {
    match segments {
        [last] => {
            if !map.contains_key(*last) {
                return None;
            }
            let mut out = map.clone();
            out.remove(*last);
            Some(out)
        }
        [head, rest @ ..] => {
            let child = match map.get(*head)? {
                Value::Object(inner) => inner,
                _ => return None,
            };
            let pruned = remove_in(child, rest)?;
            let mut out = map.clone();
            out.insert((*head).to_string(), Value::Object(pruned));
            Some(out)
        }
        [] => None,
    }
}

/// Flatten a tree into a dotted-path -> leaf mapping.
///
/// Only leaves become entries; empty subtrees contribute nothing.
pub fn flatten(tree: &Value) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    if let Value::Object(map) = tree {
        flatten_in(map, "", &mut out);
    }
    out
}

fn flatten_in(map: &Map<String, Value>, prefix: &str, out: &mut BTreeMap<String, Value>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_in(inner, &path, out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}
