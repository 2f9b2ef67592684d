//! Pending edit text for one editing episode.

use std::collections::HashMap;

use crate::rows::FieldRow;
use crate::text::value_to_text;

/// Raw text typed into each field, by row key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    pending: HashMap<String, String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session holding the current text of every editable row.
    pub fn seed(rows: &[FieldRow]) -> Self {
        let pending = rows
            .iter()
            .filter_map(|row| Some((row.editable_key()?.to_string(), value_to_text(&row.value))))
            .collect();
        Self { pending }
    }

    pub fn set(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.pending.insert(key.into(), raw.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pending.get(key).map(String::as_str)
    }

    /// Drop the pending text for `key`, leaving that row untouched on save.
    pub fn revert(&mut self, key: &str) -> Option<String> {
        self.pending.remove(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether saving against `rows` would change anything.
    pub fn is_dirty(&self, rows: &[FieldRow]) -> bool {
        !crate::diff::diff(rows, self).is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EditSession {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let pending = iter
            .into_iter()
            .map(|(key, raw)| (key.into(), raw.into()))
            .collect();
        Self { pending }
    }
}
