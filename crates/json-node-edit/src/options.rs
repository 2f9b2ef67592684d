//! Save behavior configuration.

use serde::{Deserialize, Serialize};

/// Order in which a save commits to the node and document stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Update the node store, then patch the document. A document failure
    /// is logged and the node store keeps the edits.
    #[default]
    NodeFirst,
    /// Patch the document in memory first and commit to neither store if
    /// that fails.
    ValidateFirst,
}

/// Options for [`SyncCoordinator::save`](crate::SyncCoordinator::save).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOptions {
    pub commit_policy: CommitPolicy,
    /// Re-read the node view after a save whose document patch failed.
    /// Off by default: the view is only replaced once the document agrees.
    pub refresh_on_failure: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            commit_policy: CommitPolicy::NodeFirst,
            refresh_on_failure: false,
        }
    }
}

impl SyncOptions {
    /// Load options from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
