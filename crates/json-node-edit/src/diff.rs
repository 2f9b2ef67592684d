//! Diff an edit session against the rows it was seeded from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce::coerce;
use crate::rows::FieldRow;
use crate::session::EditSession;
use crate::text::value_to_text;

/// A coerced change to one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    pub row_index: usize,
    pub key: String,
    pub new_value: Value,
}

/// Compute the changed editable rows, in row order.
///
/// A row changes when the session holds text for its key that differs from
/// the row's current text. Session keys with no matching row are ignored.
pub fn diff(rows: &[FieldRow], session: &EditSession) -> Vec<FieldUpdate> {
    rows.iter()
        .enumerate()
        .filter_map(|(row_index, row)| {
            let key = row.editable_key()?;
            let pending = session.get(key)?;
            if pending == value_to_text(&row.value) {
                return None;
            }
            Some(FieldUpdate {
                row_index,
                key: key.to_string(),
                new_value: coerce(pending),
            })
        })
        .collect()
}
