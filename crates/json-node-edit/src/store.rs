//! Node and document store contracts, with in-memory implementations.

use serde_json::Value;

use crate::diff::FieldUpdate;
use crate::error::StoreError;
use crate::rows::{NodeId, NodeView};
use crate::views::build_node_views;

/// Holds the flattened node views shown to the user.
pub trait NodeStore {
    fn selected_node(&self) -> Option<NodeView>;

    /// Apply updates to the rows of node `id`. Expected to succeed.
    fn update_values(&mut self, id: &NodeId, updates: &[FieldUpdate]);

    fn node_by_id(&self, id: &NodeId) -> Option<NodeView>;
}

/// Holds the document's serialized text.
pub trait DocumentStore {
    fn text(&self) -> String;

    fn set_text(&mut self, text: String);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryNodeStore {
    nodes: Vec<NodeView>,
    selected: Option<NodeId>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a view of every container in `document`.
    pub fn from_document(document: &Value) -> Self {
        Self {
            nodes: build_node_views(document),
            selected: None,
        }
    }

    /// Insert a view, replacing any view with the same id.
    pub fn insert(&mut self, view: NodeView) {
        match self.nodes.iter().position(|node| node.id == view.id) {
            Some(idx) => self.nodes[idx] = view,
            None => self.nodes.push(view),
        }
    }

    pub fn select(&mut self, id: &NodeId) -> Result<(), StoreError> {
        if !self.nodes.iter().any(|node| &node.id == id) {
            return Err(StoreError::NodeNotFound { id: id.clone() });
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|node| &node.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl NodeStore for MemoryNodeStore {
    fn selected_node(&self) -> Option<NodeView> {
        self.selected.as_ref().and_then(|id| self.node_by_id(id))
    }

    fn update_values(&mut self, id: &NodeId, updates: &[FieldUpdate]) {
        match self.nodes.iter_mut().find(|node| &node.id == id) {
            Some(node) => node.apply_updates(updates),
            None => tracing::warn!(node = %id, "update for unknown node dropped"),
        }
    }

    fn node_by_id(&self, id: &NodeId) -> Option<NodeView> {
        self.nodes.iter().find(|node| &node.id == id).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    text: String,
    revision: u64,
}

impl MemoryDocumentStore {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
        }
    }

    /// Number of writes since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::FieldRow;
    use serde_json::json;

    #[test]
    fn test_from_document_and_select() {
        let mut store = MemoryNodeStore::from_document(&json!({"customer": {"name": "Bob"}}));
        assert_eq!(store.len(), 2);
        assert_eq!(store.selected_node(), None);

        let id = NodeId::from(r#"$["customer"]"#);
        store.select(&id).unwrap();
        let view = store.selected_node().unwrap();
        assert_eq!(view.rows, vec![FieldRow::keyed("name", json!("Bob"))]);

        assert_eq!(
            store.select(&NodeId::from("nope")),
            Err(StoreError::NodeNotFound {
                id: NodeId::from("nope")
            })
        );
    }

    #[test]
    fn test_update_values() {
        let mut store = MemoryNodeStore::from_document(&json!({"a": 1}));
        let id = NodeId::from("$");
        store.update_values(
            &id,
            &[FieldUpdate {
                row_index: 0,
                key: "a".to_string(),
                new_value: json!(2),
            }],
        );
        assert_eq!(store.node_by_id(&id).unwrap().rows[0].value, json!(2));
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = MemoryNodeStore::new();
        store.insert(NodeView::new("n", vec![], vec![]));
        store.insert(NodeView::new("n", vec![], vec![FieldRow::bare(json!(1))]));
        assert_eq!(store.len(), 1);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![&NodeId::from("n")]);
        assert_eq!(store.node_by_id(&NodeId::from("n")).unwrap().rows.len(), 1);
    }

    #[test]
    fn test_document_store_revision() {
        let mut store = MemoryDocumentStore::new("{}");
        assert_eq!(store.revision(), 0);
        store.set_text("[]".to_string());
        assert_eq!(store.text(), "[]");
        assert_eq!(store.revision(), 1);
    }
}
