//! Bracket-path utilities for JSON documents.
//!
//! A path is an ordered list of [`PathStep`]s (map keys and sequence indexes)
//! leading from the document root to a subtree. Its canonical text form is
//! the bracket path: `$` followed by one `[...]` per step, keys in double
//! quotes and indexes as bare digits.
//!
//! # Example
//!
//! ```
//! use json_node_path::{format_bracket_path, parse_bracket_path, get, PathStep};
//!
//! let path = vec![PathStep::from("customer"), PathStep::from(0), PathStep::from("name")];
//! let text = format_bracket_path(&path);
//! assert_eq!(text, r#"$["customer"][0]["name"]"#);
//! assert_eq!(parse_bracket_path(&text).unwrap(), path);
//!
//! let doc = serde_json::json!({"customer": [{"name": "Bob"}]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!("Bob")));
//! ```

use thiserror::Error;

pub mod get;
pub mod types;
pub mod util;

pub use get::{get, get_mut, resolve, resolve_mut};
pub use types::{Path, PathStep};
pub use util::{format_bracket_path, is_root, is_valid_index, parse_bracket_path, ROOT};

/// Errors raised while parsing or following a path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The step at `position` names a key or index the container lacks.
    #[error("no value at step {position} (`{step}`)")]
    NotFound { position: usize, step: PathStep },
    /// The value reached before step `position` is a scalar.
    #[error("value before step {position} is not an object or array")]
    NotAContainer { position: usize },
    #[error("invalid bracket path at offset {offset}: {reason}")]
    InvalidSyntax { offset: usize, reason: &'static str },
}
