//! Structural diff between two manifests, for `--diff` previews.

use std::fmt::Write as _;

use serde_json::{Map, Value};

use super::Manifest;

/// What happened to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeKind {
    /// Present only in the new manifest.
    Added(Value),
    /// Present only in the old manifest.
    Removed(Value),
    /// Present in both with different values.
    Modified {
        /// Value on disk.
        old: Value,
        /// Value after reconciliation.
        new: Value,
    },
}

/// A change at one field path.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Object keys leading to the field, outermost first.
    pub path: Vec<String>,
    /// The change itself.
    pub kind: ChangeKind,
}

impl Change {
    /// Renders the path as `a.b."@scope/name"`, quoting keys that are not
    /// plain identifiers.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.iter().map(|key| display_key(key)).collect::<Vec<_>>().join(".")
    }
}

/// Compute the changes turning `old` into `new`.
///
/// Objects are compared key by key; any other differing values (including
/// arrays) are reported as a single modification. Changes are listed in the
/// order of `new`, followed by removals in the order of `old`.
#[must_use]
pub fn diff_manifests(old: &Manifest, new: &Manifest) -> Vec<Change> {
    let mut changes = Vec::new();
    diff_objects(&mut Vec::new(), old.fields(), new.fields(), &mut changes);
    changes
}

fn diff_objects(
    path: &mut Vec<String>,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    changes: &mut Vec<Change>,
) {
    for (key, new_value) in new {
        path.push(key.clone());
        match old.get(key) {
            None => changes.push(Change { path: path.clone(), kind: ChangeKind::Added(new_value.clone()) }),
            Some(old_value) => diff_values(path, old_value, new_value, changes),
        }
        path.pop();
    }
    for (key, old_value) in old {
        if !new.contains_key(key) {
            let mut removed = path.clone();
            removed.push(key.clone());
            changes.push(Change { path: removed, kind: ChangeKind::Removed(old_value.clone()) });
        }
    }
}

fn diff_values(path: &mut Vec<String>, old: &Value, new: &Value, changes: &mut Vec<Change>) {
    match (old, new) {
        (Value::Object(old), Value::Object(new)) => diff_objects(path, old, new, changes),
        _ if super::reconcile::structurally_equal(old, new) => {}
        _ => changes.push(Change {
            path: path.clone(),
            kind: ChangeKind::Modified { old: old.clone(), new: new.clone() },
        }),
    }
}

fn display_key(key: &str) -> String {
    let plain = !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}

/// Format changes for human-readable display.
///
/// Each line starts with `+` (added), `-` (removed) or `~` (modified).
#[must_use]
pub fn format_diff(changes: &[Change]) -> String {
    if changes.is_empty() {
        return "No changes to package.json.".to_string();
    }

    let mut out = String::new();
    for change in changes {
        let path = change.display_path();
        let _ = match &change.kind {
            ChangeKind::Added(value) => writeln!(out, "+ {path}: {value}"),
            ChangeKind::Removed(value) => writeln!(out, "- {path}: {value}"),
            ChangeKind::Modified { old, new } => writeln!(out, "~ {path}: {old} -> {new}"),
        };
    }
    out.pop();
    out
}
