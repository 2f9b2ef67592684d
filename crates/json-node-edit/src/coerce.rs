//! Free-text to scalar coercion.
//!
//! `null`, `true` and `false` map to their literals. Anything else becomes a
//! number only when rendering that number reproduces the input exactly, so
//! `"007"`, `"1.0"`, `"1e3"` and `" 5"` all stay strings.

use serde_json::{Number, Value};

use crate::text::float_to_text;

/// Coerce raw edit text into a typed scalar. Never fails.
pub fn coerce(raw: &str) -> Value {
    match raw {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match coerce_number(raw) {
            Some(n) => Value::Number(n),
            None => Value::String(raw.to_string()),
        },
    }
}

fn coerce_number(raw: &str) -> Option<Number> {
    if let Ok(i) = raw.parse::<i64>() {
        if i.to_string() == raw {
            return Some(i.into());
        }
    }
    if let Ok(u) = raw.parse::<u64>() {
        if u.to_string() == raw {
            return Some(u.into());
        }
    }
    let f: f64 = raw.parse().ok()?;
    if !f.is_finite() || float_to_text(f) != raw {
        return None;
    }
    Number::from_f64(f)
}
