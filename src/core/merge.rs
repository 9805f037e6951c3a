//! Deep-merge and structural diff engine.
//!
//! Import runs through this module twice with the same inputs: once for the
//! human-readable preview (diff only, no writes) and once for the actual
//! merge. Both see identical classifications.

use std::collections::BTreeMap;

use serde_json::Value;

/// How an incoming tree is combined with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Incoming keys are added or overwrite; current-only keys survive.
    Merge,
    /// The incoming tree replaces the store wholesale.
    Replace,
}

/// Classification of a single changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Modify,
    Remove,
}

/// One changed leaf path with its before/after values.
#[derive(Debug, Clone)]
pub struct Change {
    pub path: String,
    pub kind: ChangeKind,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

/// Recursively merge `incoming` into `base`, returning a new tree.
///
/// Where both sides hold a subtree the merge recurses; anywhere else the
/// incoming value replaces the base value entirely, including a leaf
/// silently overriding a whole subtree (incoming wins on type mismatch).
/// Keys present only in `base` are preserved untouched.
pub fn deep_merge(base: &Value, incoming: &Value) -> Value {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            let mut out = base_map.clone();
            for (key, incoming_value) in incoming_map {
                let merged = match base_map.get(key) {
                    Some(base_value @ Value::Object(_)) if incoming_value.is_object() => {
                        deep_merge(base_value, incoming_value)
                    }
                    _ => incoming_value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }
        _ => incoming.clone(),
    }
}

/// Classify the changes `incoming` would make to `current`.
///
/// Operates on already-flattened dotted-path mappings. In merge mode,
/// incoming-only keys are `Add`, differing keys are `Modify`, and
/// current-only keys are never touched. In replace mode, every current key
/// not present-and-equal in incoming is a `Remove` and every incoming key
/// not present-and-equal in current is an `Add`. Unchanged keys contribute
/// nothing in either mode.
///
/// Output is ordered lexicographically by path, removes first.
pub fn diff(
    current: &BTreeMap<String, Value>,
    incoming: &BTreeMap<String, Value>,
    mode: DiffMode,
) -> Vec<Change> {
    let mut changes = Vec::new();

    if mode == DiffMode::Replace {
        for (path, old) in current {
            if incoming.get(path) != Some(old) {
                changes.push(Change {
                    path: path.clone(),
                    kind: ChangeKind::Remove,
                    old: Some(old.clone()),
                    new: None,
                });
            }
        }
    }

    for (path, new) in incoming {
        match current.get(path) {
            None => changes.push(Change {
                path: path.clone(),
                kind: ChangeKind::Add,
                old: None,
                new: Some(new.clone()),
            }),
            Some(old) if old != new => {
                let kind = match mode {
                    DiffMode::Merge => ChangeKind::Modify,
                    DiffMode::Replace => ChangeKind::Add,
                };
                changes.push(Change {
                    path: path.clone(),
                    kind,
                    old: Some(old.clone()),
                    new: Some(new.clone()),
                });
            }
            Some(_) => {}
        }
    }

    changes
}

/// Combine two trees according to `mode`.
pub fn apply(current: &Value, incoming: &Value, mode: DiffMode) -> Value {
    match mode {
        DiffMode::Merge => deep_merge(current, incoming),
        DiffMode::Replace => incoming.clone(),
    }
}
