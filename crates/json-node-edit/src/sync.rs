//! Edit/save state machine for one node.
//!
//! `Viewing -> Editing -> Viewing` on cancel, `Editing -> Saving -> Viewing`
//! on save. A save diffs the session against the view's rows, updates the
//! node store, patches the document text, and re-reads the node view.
//!
//! Under [`CommitPolicy::NodeFirst`] a document that cannot be parsed or a
//! path that cannot be resolved leaves the node store updated and the
//! document untouched; the save reports [`SaveOutcome::Unsynced`] and the
//! view keeps its pre-save rows unless `refresh_on_failure` is set. Saving
//! again is safe since patching assigns rather than appends.

use std::fmt;

use json_node_path::PathStep;

use crate::diff::{diff, FieldUpdate};
use crate::error::{PatchError, StoreError, SyncError};
use crate::normalize::normalize;
use crate::options::{CommitPolicy, SyncOptions};
use crate::patch::patch_text;
use crate::rows::{NodeId, NodeView};
use crate::session::EditSession;
use crate::store::{DocumentStore, NodeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Viewing,
    Editing,
    Saving,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyncState::Viewing => "viewing",
            SyncState::Editing => "editing",
            SyncState::Saving => "saving",
        })
    }
}

/// Result of a save that was allowed to run.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The session matched the rows; nothing was written.
    Unchanged,
    /// Node store and document both hold the updates.
    Synced { updates: Vec<FieldUpdate> },
    /// Node store holds the updates, the document does not.
    Unsynced {
        updates: Vec<FieldUpdate>,
        error: PatchError,
    },
    /// Neither store was written.
    Rejected {
        updates: Vec<FieldUpdate>,
        error: PatchError,
    },
}

impl SaveOutcome {
    pub fn updates(&self) -> &[FieldUpdate] {
        match self {
            SaveOutcome::Unchanged => &[],
            SaveOutcome::Synced { updates }
            | SaveOutcome::Unsynced { updates, .. }
            | SaveOutcome::Rejected { updates, .. } => updates,
        }
    }

    pub fn error(&self) -> Option<&PatchError> {
        match self {
            SaveOutcome::Unsynced { error, .. } | SaveOutcome::Rejected { error, .. } => {
                Some(error)
            }
            _ => None,
        }
    }

    /// True when the document agrees with the node store afterwards.
    pub fn is_consistent(&self) -> bool {
        !matches!(self, SaveOutcome::Unsynced { .. })
    }
}

#[derive(Debug, Clone)]
pub struct SyncCoordinator {
    view: NodeView,
    state: SyncState,
    session: Option<EditSession>,
    options: SyncOptions,
}

impl SyncCoordinator {
    pub fn new(view: NodeView) -> Self {
        Self::with_options(view, SyncOptions::default())
    }

    pub fn with_options(view: NodeView, options: SyncOptions) -> Self {
        Self {
            view,
            state: SyncState::Viewing,
            session: None,
            options,
        }
    }

    /// Open the node store's current selection.
    pub fn from_selection<N: NodeStore + ?Sized>(
        nodes: &N,
        options: SyncOptions,
    ) -> Result<Self, StoreError> {
        let view = nodes.selected_node().ok_or(StoreError::NoSelection)?;
        Ok(Self::with_options(view, options))
    }

    pub fn open<N: NodeStore + ?Sized>(
        nodes: &N,
        id: &NodeId,
        options: SyncOptions,
    ) -> Result<Self, StoreError> {
        let view = nodes
            .node_by_id(id)
            .ok_or_else(|| StoreError::NodeNotFound { id: id.clone() })?;
        Ok(Self::with_options(view, options))
    }

    pub fn view(&self) -> &NodeView {
        &self.view
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// The node rendered as display text.
    pub fn display_text(&self) -> String {
        normalize(&self.view.rows)
    }

    pub fn path_string(&self) -> String {
        self.view.path_string()
    }

    /// Enter editing with a session seeded from the current rows.
    pub fn begin_edit(&mut self) -> Result<&mut EditSession, SyncError> {
        self.expect_state(SyncState::Viewing, "begin editing")?;
        self.state = SyncState::Editing;
        tracing::debug!(node = %self.view.id, "editing");
        Ok(self.session.insert(EditSession::seed(&self.view.rows)))
    }

    /// Record raw text for one field.
    pub fn edit_field(
        &mut self,
        key: impl Into<String>,
        raw: impl Into<String>,
    ) -> Result<(), SyncError> {
        self.expect_state(SyncState::Editing, "edit a field")?;
        self.session.get_or_insert_with(EditSession::new).set(key, raw);
        Ok(())
    }

    /// Discard the session and return to viewing.
    pub fn cancel(&mut self) -> Result<(), SyncError> {
        self.expect_state(SyncState::Editing, "cancel")?;
        self.session = None;
        self.state = SyncState::Viewing;
        tracing::debug!(node = %self.view.id, "edit cancelled");
        Ok(())
    }

    /// Commit the session to both stores and return to viewing.
    ///
    /// Document failures are not errors here: they are logged and reported
    /// through the returned [`SaveOutcome`].
    pub fn save<N, D>(
        &mut self,
        nodes: &mut N,
        documents: &mut D,
    ) -> Result<SaveOutcome, SyncError>
    where
        N: NodeStore + ?Sized,
        D: DocumentStore + ?Sized,
    {
        self.expect_state(SyncState::Editing, "save")?;
        let session = self.session.take().unwrap_or_default();
        self.state = SyncState::Saving;

        let updates = diff(&self.view.rows, &session);
        if updates.is_empty() {
            tracing::debug!(node = %self.view.id, "nothing to save");
            self.state = SyncState::Viewing;
            return Ok(SaveOutcome::Unchanged);
        }

        let outcome = match self.options.commit_policy {
            CommitPolicy::NodeFirst => {
                nodes.update_values(&self.view.id, &updates);
                match write_document(documents, &self.view.path, &updates) {
                    Ok(()) => SaveOutcome::Synced { updates },
                    Err(error) => {
                        tracing::error!(
                            node = %self.view.id,
                            path = %self.view.path_string(),
                            %error,
                            "document not updated; node store keeps the edits"
                        );
                        SaveOutcome::Unsynced { updates, error }
                    }
                }
            }
            CommitPolicy::ValidateFirst => {
                match patch_text(&documents.text(), &self.view.path, &updates) {
                    Ok(text) => {
                        nodes.update_values(&self.view.id, &updates);
                        documents.set_text(text);
                        SaveOutcome::Synced { updates }
                    }
                    Err(error) => {
                        tracing::warn!(
                            node = %self.view.id,
                            path = %self.view.path_string(),
                            %error,
                            "save rejected"
                        );
                        SaveOutcome::Rejected { updates, error }
                    }
                }
            }
        };

        let refresh = match outcome {
            SaveOutcome::Synced { .. } => true,
            SaveOutcome::Unsynced { .. } => self.options.refresh_on_failure,
            SaveOutcome::Unchanged | SaveOutcome::Rejected { .. } => false,
        };
        if refresh {
            self.refresh_after_save(nodes, outcome.updates());
        }
        if let SaveOutcome::Synced { updates } = &outcome {
            tracing::info!(node = %self.view.id, fields = updates.len(), "saved");
        }

        self.state = SyncState::Viewing;
        Ok(outcome)
    }

    /// Re-read the view from the node store while viewing.
    pub fn reload<N: NodeStore + ?Sized>(&mut self, nodes: &N) -> Result<(), SyncError> {
        self.expect_state(SyncState::Viewing, "reload")?;
        self.view = nodes
            .node_by_id(&self.view.id)
            .ok_or_else(|| StoreError::NodeNotFound {
                id: self.view.id.clone(),
            })?;
        Ok(())
    }

    fn refresh_after_save<N: NodeStore + ?Sized>(&mut self, nodes: &N, updates: &[FieldUpdate]) {
        match nodes.node_by_id(&self.view.id) {
            Some(view) => self.view = view,
            None => {
                tracing::warn!(node = %self.view.id, "node missing after save; applying locally");
                self.view.apply_updates(updates);
            }
        }
    }

    fn expect_state(&self, expected: SyncState, action: &'static str) -> Result<(), SyncError> {
        if self.state != expected {
            return Err(SyncError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        Ok(())
    }
}

fn write_document<D: DocumentStore + ?Sized>(
    documents: &mut D,
    path: &[PathStep],
    updates: &[FieldUpdate],
) -> Result<(), PatchError> {
    let text = patch_text(&documents.text(), path, updates)?;
    documents.set_text(text);
    Ok(())
}
