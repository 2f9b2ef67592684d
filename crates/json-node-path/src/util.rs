use serde_json::Value;

use crate::types::{Path, PathStep};
use crate::PathError;

/// Root marker of every bracket path.
pub const ROOT: &str = "$";

/// Format path steps into a bracket path string.
pub fn format_bracket_path(path: &[PathStep]) -> String {
    let mut out = String::from(ROOT);
    for step in path {
        out.push('[');
        match step {
            PathStep::Key(key) => out.push_str(&quote_key(key)),
            PathStep::Index(idx) => out.push_str(&idx.to_string()),
        }
        out.push(']');
    }
    out
}

fn quote_key(key: &str) -> String {
    Value::String(key.to_string()).to_string()
}

/// Parse a bracket path string back into path steps.
pub fn parse_bracket_path(text: &str) -> Result<Path, PathError> {
    if !text.starts_with(ROOT) {
        return Err(PathError::InvalidSyntax {
            offset: 0,
            reason: "expected `$`",
        });
    }
    let bytes = text.as_bytes();
    let mut pos = ROOT.len();
    let mut path = Vec::new();

    while pos < bytes.len() {
        if bytes[pos] != b'[' {
            return Err(PathError::InvalidSyntax {
                offset: pos,
                reason: "expected `[`",
            });
        }
        pos += 1;
        match bytes.get(pos) {
            Some(b'"') => {
                let start = pos;
                pos += 1;
                loop {
                    match bytes.get(pos) {
                        None => {
                            return Err(PathError::InvalidSyntax {
                                offset: start,
                                reason: "unterminated key",
                            })
                        }
                        Some(b'\\') => pos += 2,
                        Some(b'"') => break,
                        Some(_) => pos += 1,
                    }
                }
                let key: String = serde_json::from_str(&text[start..=pos]).map_err(|_| {
                    PathError::InvalidSyntax {
                        offset: start,
                        reason: "invalid key literal",
                    }
                })?;
                pos += 1;
                path.push(PathStep::Key(key));
            }
            Some(b) if b.is_ascii_digit() => {
                let start = pos;
                while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
                    pos += 1;
                }
                let digits = &text[start..pos];
                if !is_valid_index(digits) {
                    return Err(PathError::InvalidSyntax {
                        offset: start,
                        reason: "index has a leading zero",
                    });
                }
                let idx = digits.parse().map_err(|_| PathError::InvalidSyntax {
                    offset: start,
                    reason: "index out of range",
                })?;
                path.push(PathStep::Index(idx));
            }
            _ => {
                return Err(PathError::InvalidSyntax {
                    offset: pos,
                    reason: "expected key or index",
                })
            }
        }
        if bytes.get(pos) != Some(&b']') {
            return Err(PathError::InvalidSyntax {
                offset: pos,
                reason: "expected `]`",
            });
        }
        pos += 1;
    }

    Ok(path)
}

/// Check if a string represents a valid non-negative integer sequence index.
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a path points to the document root.
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}
