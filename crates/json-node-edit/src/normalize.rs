//! Collapse a node's rows into a single display value.

use serde_json::{Map, Value};

use crate::rows::FieldRow;
use crate::text::{to_pretty_text, value_to_text};

/// Render rows as the node's display text.
///
/// - no rows: `{}`
/// - one key-less row: that value as plain text
/// - otherwise: a pretty-printed map of the keyed scalar rows, in row order
///
/// Array and object rows never appear in the map; the graph shows them as
/// child nodes instead.
pub fn normalize(rows: &[FieldRow]) -> String {
    match rows {
        [] => "{}".to_string(),
        [row] if row.key.is_none() => value_to_text(&row.value),
        _ => {
            let map: Map<String, Value> = rows
                .iter()
                .filter_map(|row| Some((row.editable_key()?.to_string(), row.value.clone())))
                .collect();
            to_pretty_text(&Value::Object(map))
        }
    }
}
