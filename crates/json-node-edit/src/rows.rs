//! Field rows and node views.

use std::fmt;

use json_node_path::{format_bracket_path, Path};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::FieldUpdate;

/// JSON type of a field row's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl FieldKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => FieldKind::Null,
            Value::Bool(_) => FieldKind::Boolean,
            Value::Number(_) => FieldKind::Number,
            Value::String(_) => FieldKind::String,
            Value::Array(_) => FieldKind::Array,
            Value::Object(_) => FieldKind::Object,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, FieldKind::Array | FieldKind::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Null => "null",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a node's flattened view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Value,
    pub kind: FieldKind,
}

impl FieldRow {
    /// A keyed row, kind inferred from the value.
    pub fn keyed(key: impl Into<String>, value: Value) -> Self {
        let kind = FieldKind::of(&value);
        Self {
            key: Some(key.into()),
            value,
            kind,
        }
    }

    /// A key-less row, the sole row of a bare scalar node.
    pub fn bare(value: Value) -> Self {
        let kind = FieldKind::of(&value);
        Self {
            key: None,
            value,
            kind,
        }
    }

    /// The row's key when it can be edited from the flattened view.
    pub fn editable_key(&self) -> Option<&str> {
        if self.kind.is_container() {
            return None;
        }
        self.key.as_deref()
    }
}

/// Opaque node identifier assigned by whoever builds node views.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

/// A node's id, location, and flattened rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub path: Path,
    pub rows: Vec<FieldRow>,
}

impl NodeView {
    pub fn new(id: impl Into<NodeId>, path: Path, rows: Vec<FieldRow>) -> Self {
        Self {
            id: id.into(),
            path,
            rows,
        }
    }

    /// The node's location as a bracket path.
    pub fn path_string(&self) -> String {
        format_bracket_path(&self.path)
    }

    /// Apply updates to the rows they were computed against.
    ///
    /// An update whose `row_index` no longer holds its key falls back to the
    /// first editable row with that key; unmatched updates are skipped.
    pub fn apply_updates(&mut self, updates: &[FieldUpdate]) {
        for update in updates {
            let idx = match self.rows.get(update.row_index) {
                Some(row) if row.editable_key() == Some(update.key.as_str()) => {
                    Some(update.row_index)
                }
                _ => self
                    .rows
                    .iter()
                    .position(|row| row.editable_key() == Some(update.key.as_str())),
            };
            let Some(idx) = idx else {
                tracing::warn!(node = %self.id, key = %update.key, "no row for update");
                continue;
            };
            let row = &mut self.rows[idx];
            row.value = update.new_value.clone();
            row.kind = FieldKind::of(&row.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of() {
        assert_eq!(FieldKind::of(&json!("x")), FieldKind::String);
        assert_eq!(FieldKind::of(&json!(1.5)), FieldKind::Number);
        assert_eq!(FieldKind::of(&json!(false)), FieldKind::Boolean);
        assert_eq!(FieldKind::of(&json!(null)), FieldKind::Null);
        assert_eq!(FieldKind::of(&json!([])), FieldKind::Array);
        assert_eq!(FieldKind::of(&json!({})), FieldKind::Object);
    }

    #[test]
    fn test_editable_key() {
        assert_eq!(FieldRow::keyed("a", json!(1)).editable_key(), Some("a"));
        assert_eq!(FieldRow::keyed("a", json!([])).editable_key(), None);
        assert_eq!(FieldRow::bare(json!(1)).editable_key(), None);
    }

    #[test]
    fn test_row_serde_shape() {
        let row: FieldRow =
            serde_json::from_value(json!({"key": "age", "value": 30, "kind": "number"})).unwrap();
        assert_eq!(row, FieldRow::keyed("age", json!(30)));

        let row: FieldRow = serde_json::from_value(json!({"value": 5, "kind": "number"})).unwrap();
        assert_eq!(row.key, None);
        assert_eq!(serde_json::to_value(&row).unwrap(), json!({"value": 5, "kind": "number"}));
    }

    #[test]
    fn test_apply_updates_changes_kind() {
        let mut view = NodeView::new(
            "n",
            vec!["customer".into()],
            vec![
                FieldRow::keyed("name", json!("Bob")),
                FieldRow::keyed("age", json!(30)),
            ],
        );
        view.apply_updates(&[FieldUpdate {
            row_index: 1,
            key: "age".to_string(),
            new_value: json!("unknown"),
        }]);
        assert_eq!(view.rows[1], FieldRow::keyed("age", json!("unknown")));
        assert_eq!(view.rows[1].kind, FieldKind::String);
    }

    #[test]
    fn test_apply_updates_falls_back_to_key() {
        let mut view = NodeView::new("n", vec![], vec![FieldRow::keyed("a", json!(1))]);
        view.apply_updates(&[
            FieldUpdate {
                row_index: 4,
                key: "a".to_string(),
                new_value: json!(2),
            },
            FieldUpdate {
                row_index: 0,
                key: "zzz".to_string(),
                new_value: json!(3),
            },
        ]);
        assert_eq!(view.rows, vec![FieldRow::keyed("a", json!(2))]);
    }

    #[test]
    fn test_path_string() {
        let view = NodeView::new("n", vec!["customer".into(), 0.into()], vec![]);
        assert_eq!(view.path_string(), r#"$["customer"][0]"#);
    }
}
