//! Writing inspector edits back into the graph

use crate::sync::{FieldMut, SyncNode};
use crate::uniform::{CodecError, UniformValue};

/// Error type for applying an edit
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    /// No parameter is displayed at this path
    #[error("no control at '{0}'")]
    UnknownControl(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// A value changed by the user in an inspector control
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEdit {
    /// Folder names from the inspector root
    pub folders: Vec<String>,
    /// Control (parameter field) name
    pub name: String,
    pub value: UniformValue,
}

impl ControlEdit {
    /// Build from a host path whose last element is the control name
    pub fn from_path(path: &[String], value: UniformValue) -> Option<Self> {
        let (name, folders) = path.split_last()?;
        Some(Self {
            folders: folders.to_vec(),
            name: name.clone(),
            value,
        })
    }

    fn display_path(&self) -> String {
        self.folders
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Store an edited value in the parameter it was displayed for.
///
/// The parameter keeps its type; a value of another type is rejected.
pub fn apply_edit(root: &mut dyn SyncNode, edit: &ControlEdit) -> Result<(), EditError> {
    apply_at(root, &edit.folders, edit).map_err(|e| match e {
        EditError::UnknownControl(_) => EditError::UnknownControl(edit.display_path()),
        other => other,
    })
}

fn apply_at(
    node: &mut dyn SyncNode,
    folders: &[String],
    edit: &ControlEdit,
) -> Result<(), EditError> {
    let target = folders.first().map(String::as_str).unwrap_or(edit.name.as_str());

    for (name, field) in node.fields_mut() {
        if name != target {
            continue;
        }
        match (field, folders.split_first()) {
            (FieldMut::Node(child), Some((_, rest))) => return apply_at(child, rest, edit),
            (FieldMut::Parameter(parameter), None) => {
                parameter.uniform.set(edit.value.clone())?;
                return Ok(());
            }
            _ => {}
        }
    }

    Err(EditError::UnknownControl(String::new()))
}
