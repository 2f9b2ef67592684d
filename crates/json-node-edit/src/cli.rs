//! Logic behind the `json-node-edit` binary.
//!
//! - `show` — print a node's bracket path and display text
//! - `list` — print the id of every node in a document
//! - `set`  — apply `key=value` edits to a node and return the new document

use serde_json::Value;
use thiserror::Error;

use crate::error::{StoreError, SyncError};
use crate::options::SyncOptions;
use crate::rows::NodeId;
use crate::store::{DocumentStore, MemoryDocumentStore, MemoryNodeStore};
use crate::sync::{SaveOutcome, SyncCoordinator};
use json_node_path::{format_bracket_path, parse_bracket_path, PathError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
    #[error("expected `key=value`, got `{0}`")]
    Assignment(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// A `key=value` edit; the value is raw text, coerced on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub raw: String,
}

impl std::str::FromStr for Assignment {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, raw) = s
            .split_once('=')
            .ok_or_else(|| CliError::Assignment(s.to_string()))?;
        Ok(Assignment {
            key: key.to_string(),
            raw: raw.to_string(),
        })
    }
}

/// What `set` produced.
#[derive(Debug)]
pub struct SetReport {
    pub outcome: SaveOutcome,
    pub text: String,
    pub display: String,
}

fn open(
    text: &str,
    path: &str,
    options: SyncOptions,
) -> Result<(MemoryNodeStore, SyncCoordinator), CliError> {
    let document: Value = serde_json::from_str(text)?;
    let id = NodeId::from(format_bracket_path(&parse_bracket_path(path)?));
    let nodes = MemoryNodeStore::from_document(&document);
    let sync = SyncCoordinator::open(&nodes, &id, options)?;
    Ok((nodes, sync))
}

pub fn show_node(text: &str, path: &str) -> Result<String, CliError> {
    let (_, sync) = open(text, path, SyncOptions::default())?;
    Ok(format!("{}\n{}", sync.path_string(), sync.display_text()))
}

pub fn list_nodes(text: &str) -> Result<Vec<String>, CliError> {
    let document: Value = serde_json::from_str(text)?;
    let nodes = MemoryNodeStore::from_document(&document);
    Ok(nodes.ids().map(|id| id.to_string()).collect())
}

pub fn set_fields(
    text: &str,
    path: &str,
    edits: &[Assignment],
    options: SyncOptions,
) -> Result<SetReport, CliError> {
    let (mut nodes, mut sync) = open(text, path, options)?;
    let mut documents = MemoryDocumentStore::new(text);
    sync.begin_edit()?;
    for edit in edits {
        sync.edit_field(edit.key.clone(), edit.raw.clone())?;
    }
    let outcome = sync.save(&mut nodes, &mut documents)?;
    Ok(SetReport {
        outcome,
        text: documents.text(),
        display: sync.display_text(),
    })
}
