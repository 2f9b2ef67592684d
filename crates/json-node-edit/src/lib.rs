//! Flattened node editing for JSON documents.
//!
//! A node of a document is shown as ordered [`FieldRow`]s. Edits are typed
//! as free text into an [`EditSession`], [`diff`]ed against the rows into
//! [`FieldUpdate`]s with [`coerce`]d values, and written back by the
//! [`SyncCoordinator`] into a [`NodeStore`] and, through
//! [`apply_updates`], into the document held by a [`DocumentStore`].
//!
//! ```
//! use json_node_edit::{
//!     MemoryDocumentStore, MemoryNodeStore, NodeId, SaveOutcome, SyncCoordinator, SyncOptions,
//! };
//!
//! let text = r#"{"customer":{"name":"Bob","age":30}}"#;
//! let mut documents = MemoryDocumentStore::new(text);
//! let mut nodes = MemoryNodeStore::from_document(&serde_json::from_str(text).unwrap());
//!
//! let id = NodeId::from(r#"$["customer"]"#);
//! let mut sync = SyncCoordinator::open(&nodes, &id, SyncOptions::default()).unwrap();
//! sync.begin_edit().unwrap();
//! sync.edit_field("age", "31").unwrap();
//! let outcome = sync.save(&mut nodes, &mut documents).unwrap();
//!
//! assert!(matches!(outcome, SaveOutcome::Synced { .. }));
//! assert_eq!(sync.display_text(), "{\n  \"name\": \"Bob\",\n  \"age\": 31\n}");
//! ```

pub mod cli;
pub mod coerce;
pub mod diff;
pub mod error;
pub mod normalize;
pub mod options;
pub mod patch;
pub mod rows;
pub mod session;
pub mod store;
pub mod sync;
pub mod text;
pub mod views;

pub use coerce::coerce;
pub use diff::{diff, FieldUpdate};
pub use error::{PatchError, StoreError, SyncError};
pub use normalize::normalize;
pub use options::{CommitPolicy, SyncOptions};
pub use patch::{apply_updates, patch_text};
pub use rows::{FieldKind, FieldRow, NodeId, NodeView};
pub use session::EditSession;
pub use store::{DocumentStore, MemoryDocumentStore, MemoryNodeStore, NodeStore};
pub use sync::{SaveOutcome, SyncCoordinator, SyncState};
pub use text::{to_pretty_text, value_to_text};
pub use views::{build_node_view, build_node_views};

pub use json_node_path::{format_bracket_path, parse_bracket_path, Path, PathError, PathStep};
