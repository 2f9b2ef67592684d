//! Write field updates back into the owning document.

use json_node_path::{format_bracket_path, is_valid_index, resolve_mut, PathStep};
use serde_json::Value;

use crate::diff::FieldUpdate;
use crate::error::PatchError;
use crate::text::to_pretty_text;

/// Assign every update into the subtree at `path` and return the
/// re-serialized document.
///
/// Assignment overwrites existing keys in place, so applying the same
/// updates twice leaves the document as applying them once. On a sequence
/// target each key must be an in-range index; all keys are checked before
/// any element is written.
pub fn apply_updates(
    document: &mut Value,
    path: &[PathStep],
    updates: &[FieldUpdate],
) -> Result<String, PatchError> {
    match resolve_mut(document, path)? {
        Value::Object(map) => {
            for update in updates {
                map.insert(update.key.clone(), update.new_value.clone());
            }
        }
        Value::Array(arr) => {
            let len = arr.len();
            let slots = updates
                .iter()
                .map(|update| {
                    index_of(&update.key)
                        .filter(|&idx| idx < len)
                        .ok_or_else(|| PatchError::IndexOutOfRange {
                            path: format_bracket_path(path),
                            key: update.key.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            for (idx, update) in slots.into_iter().zip(updates) {
                arr[idx] = update.new_value.clone();
            }
        }
        _ => {
            return Err(PatchError::TargetNotContainer {
                path: format_bracket_path(path),
            })
        }
    }
    Ok(to_pretty_text(document))
}

fn index_of(key: &str) -> Option<usize> {
    if !is_valid_index(key) {
        return None;
    }
    key.parse().ok()
}

/// Parse document text, apply updates at `path`, and return the new text.
pub fn patch_text(
    text: &str,
    path: &[PathStep],
    updates: &[FieldUpdate],
) -> Result<String, PatchError> {
    let mut document: Value = serde_json::from_str(text).map_err(PatchError::Parse)?;
    apply_updates(&mut document, path, updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_node_path::PathError;
    use serde_json::json;

    fn update(key: &str, new_value: Value) -> FieldUpdate {
        FieldUpdate {
            row_index: 0,
            key: key.to_string(),
            new_value,
        }
    }

    #[test]
    fn test_overwrite_keeps_key_position() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        apply_updates(&mut doc, &[], &[update("b", json!("two"))]).unwrap();
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(doc["b"], json!("two"));
    }

    #[test]
    fn test_missing_key_is_added() {
        let mut doc = json!({"a": 1});
        apply_updates(&mut doc, &[], &[update("z", json!(null))]).unwrap();
        assert_eq!(doc, json!({"a": 1, "z": null}));
    }

    #[test]
    fn test_array_target() {
        let mut doc = json!({"list": [1, 2, 3]});
        apply_updates(&mut doc, &["list".into()], &[update("1", json!(20))]).unwrap();
        assert_eq!(doc, json!({"list": [1, 20, 3]}));
    }

    #[test]
    fn test_array_target_rejects_bad_index_without_writing() {
        let mut doc = json!([1, 2]);
        let err = apply_updates(
            &mut doc,
            &[],
            &[update("0", json!(9)), update("2", json!(9))],
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::IndexOutOfRange { ref key, .. } if key == "2"));
        assert_eq!(doc, json!([1, 2]));

        assert!(apply_updates(&mut doc, &[], &[update("x", json!(9))]).is_err());
    }

    #[test]
    fn test_scalar_target() {
        let mut doc = json!({"a": 1});
        let err = apply_updates(&mut doc, &["a".into()], &[update("b", json!(2))]).unwrap_err();
        assert!(matches!(err, PatchError::TargetNotContainer { ref path } if path == r#"$["a"]"#));
    }

    #[test]
    fn test_unresolvable_path() {
        let mut doc = json!({"customer": {"name": "Bob"}});
        let err = apply_updates(
            &mut doc,
            &["missing".into(), "x".into()],
            &[update("name", json!("Al"))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PatchError::Path(PathError::NotFound { position: 0, .. })
        ));
    }

    #[test]
    fn test_patch_text_parse_error() {
        let err = patch_text("{not json", &[], &[update("a", json!(1))]).unwrap_err();
        assert!(matches!(err, PatchError::Parse(_)));
    }

    #[test]
    fn test_patch_text_pretty_prints() {
        let out = patch_text(r#"{"a":{"b":1}}"#, &["a".into()], &[update("b", json!(2))]).unwrap();
        assert_eq!(out, "{\n  \"a\": {\n    \"b\": 2\n  }\n}");
    }

    #[test]
    fn test_patch_text_keeps_serde_number_spelling() {
        let big = crate::coerce::coerce("100000000000000000000");
        let out = patch_text(r#"{"a":1.0,"b":0}"#, &[], &[update("b", big)]).unwrap();
        assert!(out.contains("\"a\": 1.0"));

        let reparsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(reparsed["b"].as_f64(), Some(1e20));
    }
}
