use serde_json::Value;

use crate::types::PathStep;
use crate::util::is_valid_index;
use crate::PathError;

fn is_container(val: &Value) -> bool {
    matches!(val, Value::Object(_) | Value::Array(_))
}

fn child<'a>(current: &'a Value, step: &PathStep) -> Option<&'a Value> {
    match (current, step) {
        (Value::Object(map), PathStep::Key(key)) => map.get(key),
        (Value::Object(map), PathStep::Index(idx)) => map.get(&idx.to_string()),
        (Value::Array(arr), PathStep::Index(idx)) => arr.get(*idx),
        (Value::Array(arr), PathStep::Key(key)) if is_valid_index(key) => {
            arr.get(key.parse::<usize>().ok()?)
        }
        _ => None,
    }
}

fn child_mut<'a>(current: &'a mut Value, step: &PathStep) -> Option<&'a mut Value> {
    match (current, step) {
        (Value::Object(map), PathStep::Key(key)) => map.get_mut(key),
        (Value::Object(map), PathStep::Index(idx)) => map.get_mut(&idx.to_string()),
        (Value::Array(arr), PathStep::Index(idx)) => arr.get_mut(*idx),
        (Value::Array(arr), PathStep::Key(key)) if is_valid_index(key) => {
            arr.get_mut(key.parse::<usize>().ok()?)
        }
        _ => None,
    }
}

/// Resolve a path to the subtree it locates.
pub fn resolve<'a>(val: &'a Value, path: &[PathStep]) -> Result<&'a Value, PathError> {
    let mut current = val;
    for (position, step) in path.iter().enumerate() {
        if !is_container(current) {
            return Err(PathError::NotAContainer { position });
        }
        current = child(current, step).ok_or_else(|| PathError::NotFound {
            position,
            step: step.clone(),
        })?;
    }
    Ok(current)
}

/// Resolve a path to a mutable reference to the subtree it locates.
pub fn resolve_mut<'a>(val: &'a mut Value, path: &[PathStep]) -> Result<&'a mut Value, PathError> {
    let mut current = val;
    for (position, step) in path.iter().enumerate() {
        if !is_container(current) {
            return Err(PathError::NotAContainer { position });
        }
        current = child_mut(current, step).ok_or_else(|| PathError::NotFound {
            position,
            step: step.clone(),
        })?;
    }
    Ok(current)
}

/// Get a value from a document by path.
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    resolve(val, path).ok()
}

/// Get a mutable reference to a value in a document by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    resolve_mut(val, path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_root() {
        let doc = json!({"a": 1});
        assert_eq!(resolve(&doc, &[]).unwrap(), &doc);
    }

    #[test]
    fn test_index_step_on_object_uses_digit_key() {
        let doc = json!({"0": "zero"});
        assert_eq!(get(&doc, &[PathStep::Index(0)]), Some(&json!("zero")));
    }

    #[test]
    fn test_key_step_on_array_requires_canonical_index() {
        let doc = json!([10, 20]);
        assert_eq!(get(&doc, &["1".into()]), Some(&json!(20)));
        assert_eq!(get(&doc, &["01".into()]), None);
        assert_eq!(get(&doc, &["x".into()]), None);
    }

    #[test]
    fn test_resolve_reports_position() {
        let doc = json!({"a": {"b": 1}});
        let err = resolve(&doc, &["a".into(), "c".into()]).unwrap_err();
        assert_eq!(
            err,
            PathError::NotFound {
                position: 1,
                step: "c".into()
            }
        );
    }

    #[test]
    fn test_resolve_through_scalar() {
        let doc = json!({"a": 1});
        let err = resolve(&doc, &["a".into(), "b".into()]).unwrap_err();
        assert_eq!(err, PathError::NotAContainer { position: 1 });
    }

    #[test]
    fn test_resolve_mut_allows_edit() {
        let mut doc = json!({"list": [{"n": 1}]});
        let target = resolve_mut(&mut doc, &["list".into(), 0.into()]).unwrap();
        target["n"] = json!(2);
        assert_eq!(doc, json!({"list": [{"n": 2}]}));
    }
}
