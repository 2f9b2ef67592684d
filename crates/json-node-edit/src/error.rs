use json_node_path::PathError;
use thiserror::Error;

use crate::rows::NodeId;
use crate::sync::SyncState;

/// Failures while writing updates into a document.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("cannot resolve node path: {0}")]
    Path(#[from] PathError),
    #[error("value at {path} is not an object or array")]
    TargetNotContainer { path: String },
    #[error("key `{key}` is not an index of the array at {path}")]
    IndexOutOfRange { path: String, key: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("node not found: {id}")]
    NodeNotFound { id: NodeId },
    #[error("no node is selected")]
    NoSelection,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: SyncState,
        action: &'static str,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
