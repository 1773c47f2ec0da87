//! Reading and writing persistence trees as JSON documents

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::sync::DataTree;

/// Error type for data documents
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document's top level is not an object
    #[error("data document must be an object, found {0}")]
    NotATree(String),
}

/// Parse a document into a tree
pub fn parse_tree(text: &str) -> Result<DataTree, PersistError> {
    match serde_json::from_str(text)? {
        Value::Object(tree) => Ok(tree),
        other => Err(PersistError::NotATree(kind_of(&other).to_string())),
    }
}

/// Render a tree as a document
pub fn to_json(tree: &DataTree, pretty: bool) -> Result<String, PersistError> {
    let text = if pretty {
        serde_json::to_string_pretty(tree)?
    } else {
        serde_json::to_string(tree)?
    };
    Ok(text)
}

pub fn load_tree(path: &Path) -> Result<DataTree, PersistError> {
    let text = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = parse_tree(&text)?;
    tracing::info!("Loaded {} ({} entries)", path.display(), tree.len());
    Ok(tree)
}

pub fn save_tree(path: &Path, tree: &DataTree, pretty: bool) -> Result<(), PersistError> {
    let text = to_json(tree, pretty)?;
    std::fs::write(path, text).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
