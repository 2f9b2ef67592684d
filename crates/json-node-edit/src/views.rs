//! Derive node views from a document.
//!
//! Every object and array becomes a node whose id is its bracket path.
//! Objects get one row per key, arrays one row per element keyed by its
//! index, and a scalar document a single key-less row.

use json_node_path::{format_bracket_path, resolve, Path, PathError, PathStep};
use serde_json::Value;

use crate::rows::{FieldRow, NodeView};

/// Build the view of the subtree at `path`.
pub fn build_node_view(document: &Value, path: &[PathStep]) -> Result<NodeView, PathError> {
    let subtree = resolve(document, path)?;
    Ok(view_of(subtree, path))
}

/// Build views for the root and every nested container, depth first.
pub fn build_node_views(document: &Value) -> Vec<NodeView> {
    let mut views = Vec::new();
    let mut path = Path::new();
    collect(document, &mut path, &mut views);
    views
}

fn collect(value: &Value, path: &mut Path, views: &mut Vec<NodeView>) {
    views.push(view_of(value, path));
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_container(child) {
                    path.push(PathStep::Key(key.clone()));
                    collect(child, path, views);
                    path.pop();
                }
            }
        }
        Value::Array(arr) => {
            for (idx, child) in arr.iter().enumerate() {
                if is_container(child) {
                    path.push(PathStep::Index(idx));
                    collect(child, path, views);
                    path.pop();
                }
            }
        }
        _ => {}
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn view_of(value: &Value, path: &[PathStep]) -> NodeView {
    let rows = match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| FieldRow::keyed(key.clone(), child.clone()))
            .collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(idx, child)| FieldRow::keyed(idx.to_string(), child.clone()))
            .collect(),
        scalar => vec![FieldRow::bare(scalar.clone())],
    };
    NodeView::new(format_bracket_path(path), path.to_vec(), rows)
}
