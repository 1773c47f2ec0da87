//! Persistence tree synchronization
//!
//! Graph nodes opt into persistence by implementing [`SyncNode`]. The default
//! `export_to` / `import_from` walk the node's fields in declaration order, so
//! most nodes only list their fields. Nodes with their own persistence shape
//! (the parameter registry) override the walk.
//!
//! Trees are sparse: a field whose export is empty is left out, and a
//! non-persistent parameter never appears.

mod leaf;

pub use leaf::PersistedUniform;

use hashbrown::HashSet;
use serde_json::Value;

use crate::registry::{Parameter, ParameterMut, RegistryError};
use crate::texture::TextureResolver;
use crate::uniform::CodecError;

/// A plain-data document (a JSON object, insertion ordered)
pub type DataTree = serde_json::Map<String, Value>;

bitflags::bitflags! {
    /// What a node takes part in
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// Writes itself into a persistence tree
        const EXPORT = 0b0000_0001;
        /// Reads itself back from a persistence tree
        const IMPORT = 0b0000_0010;
    }
}

/// Error type for export and import
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A composite field's entry is not an object
    #[error("entry '{key}' should be an object, found {found}")]
    NotATree { key: String, found: String },
    /// A leaf entry is not `{"uniformType": .., "value": ..}`
    #[error("entry '{key}' is not a uniform: {reason}")]
    MalformedLeaf { key: String, reason: String },
}

/// Borrowed view of a field
pub enum FieldRef<'a> {
    Node(&'a dyn SyncNode),
    Parameter(&'a Parameter),
}

/// Mutable view of a field
pub enum FieldMut<'a> {
    Node(&'a mut dyn SyncNode),
    Parameter(ParameterMut<'a>),
}

/// A node of the live object graph
pub trait SyncNode {
    /// Participating fields, in declaration order
    fn fields(&self) -> Vec<(&str, FieldRef<'_>)>;

    /// Same fields as [`SyncNode::fields`], mutably
    fn fields_mut(&mut self) -> Vec<(&str, FieldMut<'_>)>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    /// Shown as a folder in the debug inspector
    fn debug_visible(&self) -> bool {
        false
    }

    /// Whether import takes keys it has no field for
    fn adopts_unknown_keys(&self) -> bool {
        false
    }

    fn export_to(&self, tree: &mut DataTree) -> Result<(), SyncError> {
        export_fields(self, tree)
    }

    fn import_from(
        &mut self,
        tree: &DataTree,
        textures: &mut dyn TextureResolver,
    ) -> Result<(), SyncError> {
        import_fields(self, tree, textures)
    }
}

/// Serialize a graph into a fresh persistence tree.
///
/// On error no tree is produced.
pub fn export<N: SyncNode + ?Sized>(root: &N) -> Result<DataTree, SyncError> {
    let mut tree = DataTree::new();
    root.export_to(&mut tree)?;
    Ok(tree)
}

/// Merge a persistence tree into a graph.
///
/// The merge runs on a copy of `root` that replaces it only when every field
/// imported cleanly, so a failed import leaves `root` untouched.
pub fn import<N: SyncNode + Clone>(
    root: &mut N,
    tree: &DataTree,
    textures: &mut dyn TextureResolver,
) -> Result<(), SyncError> {
    let mut staged = root.clone();
    staged.import_from(tree, textures)?;
    *root = staged;
    Ok(())
}

/// Default export walk over a node's fields
pub fn export_fields<N: SyncNode + ?Sized>(node: &N, tree: &mut DataTree) -> Result<(), SyncError> {
    for (name, field) in node.fields() {
        match field {
            FieldRef::Node(child) => {
                if !child.capabilities().contains(Capabilities::EXPORT) {
                    continue;
                }
                let mut sub = DataTree::new();
                child.export_to(&mut sub)?;
                if !sub.is_empty() {
                    tree.insert(name.to_string(), Value::Object(sub));
                }
            }
            FieldRef::Parameter(parameter) => {
                if parameter.is_persistent() {
                    let leaf = PersistedUniform::from_uniform(parameter.uniform());
                    tree.insert(name.to_string(), leaf.into_value());
                }
            }
        }
    }
    Ok(())
}

/// Default import walk over a node's fields.
///
/// Missing entries import as empty trees; entries without a field are skipped.
pub fn import_fields<N: SyncNode + ?Sized>(
    node: &mut N,
    tree: &DataTree,
    textures: &mut dyn TextureResolver,
) -> Result<(), SyncError> {
    let empty = DataTree::new();
    let mut known = HashSet::new();

    for (name, field) in node.fields_mut() {
        known.insert(name.to_string());
        match field {
            FieldMut::Node(child) => {
                if !child.capabilities().contains(Capabilities::IMPORT) {
                    continue;
                }
                let sub = subtree(tree, name)?.unwrap_or(&empty);
                child.import_from(sub, textures)?;
            }
            FieldMut::Parameter(parameter) => {
                let Some(raw) = tree.get(name) else {
                    continue;
                };
                if !parameter.persistent {
                    tracing::debug!("Skipping non-persistent parameter '{}'", name);
                    continue;
                }
                let leaf = PersistedUniform::from_value(name, raw)?;
                let decoded = leaf.decode_as(parameter.uniform.uniform_type(), textures)?;
                *parameter.uniform = decoded;
            }
        }
    }

    for key in tree.keys().filter(|key| !known.contains(key.as_str())) {
        tracing::debug!("Ignoring unknown entry '{}'", key);
    }

    Ok(())
}

/// Keys of `tree` that importing into `root` would skip, as `/`-joined paths
pub fn ignored_keys<N: SyncNode + ?Sized>(root: &N, tree: &DataTree) -> Vec<String> {
    let mut ignored = Vec::new();
    collect_ignored(root, tree, "", &mut ignored);
    ignored
}

fn collect_ignored<N: SyncNode + ?Sized>(
    node: &N,
    tree: &DataTree,
    prefix: &str,
    out: &mut Vec<String>,
) {
    if node.adopts_unknown_keys() {
        return;
    }
    let fields = node.fields();
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}/{key}")
        };
        match fields.iter().find(|(name, _)| *name == key.as_str()) {
            None => out.push(path),
            Some((_, FieldRef::Node(child))) => {
                if let Value::Object(sub) = value {
                    collect_ignored(*child, sub, &path, out);
                }
            }
            Some((_, FieldRef::Parameter(_))) => {}
        }
    }
}

fn subtree<'t>(tree: &'t DataTree, key: &str) -> Result<Option<&'t DataTree>, SyncError> {
    match tree.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(SyncError::NotATree {
            key: key.to_string(),
            found: other.to_string(),
        }),
    }
}
