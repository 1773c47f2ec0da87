//! Display tree reconciliation
//!
//! [`reconcile`] compares the live graph with the tree the host currently
//! shows and returns the new tree plus the host operations that turn one into
//! the other. Nothing here touches the host; [`UiOp::apply`] does.

use crate::config::{InspectorConfig, RangeConfig};
use crate::registry::Parameter;
use crate::sync::{FieldRef, SyncNode};
use crate::uniform::{Color, UniformValue};

use super::host::InspectorHost;
use super::types::{ControlKind, DisplayControl, DisplayFolder};

/// One change to the displayed tree
#[derive(Debug, Clone, PartialEq)]
pub enum UiOp {
    AddFolder {
        path: Vec<String>,
    },
    AddColorControl {
        path: Vec<String>,
        value: Color,
    },
    AddRangeControl {
        path: Vec<String>,
        range: RangeConfig,
        value: UniformValue,
    },
    AddPathControl {
        path: Vec<String>,
        value: String,
    },
    SetValue {
        path: Vec<String>,
        value: UniformValue,
    },
    RemoveNode {
        path: Vec<String>,
    },
}

impl UiOp {
    pub fn path(&self) -> &[String] {
        match self {
            UiOp::AddFolder { path }
            | UiOp::AddColorControl { path, .. }
            | UiOp::AddRangeControl { path, .. }
            | UiOp::AddPathControl { path, .. }
            | UiOp::SetValue { path, .. }
            | UiOp::RemoveNode { path } => path,
        }
    }

    /// Carry out the operation on a host
    pub fn apply(&self, host: &mut dyn InspectorHost) {
        match self {
            UiOp::AddFolder { path } => host.add_folder(path),
            UiOp::AddColorControl { path, value } => host.add_color_control(path, *value),
            UiOp::AddRangeControl { path, range, value } => {
                host.add_range_control(path, *range, value)
            }
            UiOp::AddPathControl { path, value } => host.add_path_control(path, value),
            UiOp::SetValue { path, value } => host.set_control_value(path, value),
            UiOp::RemoveNode { path } => host.remove_node(path),
        }
    }
}

/// Result of one reconciliation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// What the host shows once `ops` are applied
    pub displayed: DisplayFolder,
    pub ops: Vec<UiOp>,
}

/// Reconcile the display tree of `root` against what is currently shown.
pub fn reconcile(
    root: &dyn SyncNode,
    previous: &DisplayFolder,
    config: &InspectorConfig,
) -> Reconciled {
    let mut ops = Vec::new();
    let mut path = Vec::new();
    let displayed = reconcile_folder(root, previous, &mut path, config, &mut ops);
    Reconciled { displayed, ops }
}

fn reconcile_folder(
    node: &dyn SyncNode,
    previous: &DisplayFolder,
    path: &mut Vec<String>,
    config: &InspectorConfig,
    ops: &mut Vec<UiOp>,
) -> DisplayFolder {
    let mut fields = node.fields();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let visible_node = |name: &str| {
        fields.iter().find_map(|(field, value)| match value {
            FieldRef::Node(child) if *field == name && child.debug_visible() => Some(*child),
            _ => None,
        })
    };
    let visible_parameter = |name: &str| {
        fields.iter().find_map(|(field, value)| match value {
            FieldRef::Parameter(p) if *field == name && p.is_debug_visible() => Some(*p),
            _ => None,
        })
    };

    let mut folder = DisplayFolder::named(previous.name.clone());

    // Existing folders: drop stale ones, reconcile the rest bottom-up
    for shown in &previous.folders {
        path.push(shown.name.clone());
        match visible_node(&shown.name) {
            Some(child) => {
                let mut nested = Vec::new();
                let updated = reconcile_folder(child, shown, path, config, &mut nested);
                if updated.is_empty() {
                    ops.push(UiOp::RemoveNode { path: path.clone() });
                } else {
                    ops.extend(nested);
                    folder.folders.push(updated);
                }
            }
            None => ops.push(UiOp::RemoveNode { path: path.clone() }),
        }
        path.pop();
    }

    // Existing controls: drop stale ones, push changed values
    for shown in &previous.controls {
        path.push(shown.name.clone());
        let parameter = visible_parameter(&shown.name);
        match parameter.and_then(|p| control_for(&shown.name, p, config)) {
            Some(current) if current.kind == shown.kind => {
                if current.value != shown.value {
                    ops.push(UiOp::SetValue {
                        path: path.clone(),
                        value: current.value.clone(),
                    });
                }
                folder.controls.push(current);
            }
            Some(current) => {
                // Same name, different widget
                ops.push(UiOp::RemoveNode { path: path.clone() });
                ops.push(add_control_op(path.clone(), &current));
                folder.controls.push(current);
            }
            None => ops.push(UiOp::RemoveNode { path: path.clone() }),
        }
        path.pop();
    }

    // New fields
    for (name, field) in &fields {
        match field {
            FieldRef::Node(child) => {
                if !child.debug_visible() || previous.folder(name).is_some() {
                    continue;
                }
                path.push(name.to_string());
                let mut nested = Vec::new();
                let created = reconcile_folder(
                    *child,
                    &DisplayFolder::named(*name),
                    path,
                    config,
                    &mut nested,
                );
                if !created.is_empty() {
                    ops.push(UiOp::AddFolder { path: path.clone() });
                    ops.extend(nested);
                    folder.folders.push(created);
                }
                path.pop();
            }
            FieldRef::Parameter(parameter) => {
                if !parameter.is_debug_visible() || previous.control(name).is_some() {
                    continue;
                }
                if let Some(control) = control_for(name, parameter, config) {
                    path.push(name.to_string());
                    ops.push(add_control_op(path.clone(), &control));
                    path.pop();
                    folder.controls.push(control);
                }
            }
        }
    }

    folder.folders.sort_by(|a, b| a.name.cmp(&b.name));
    folder.controls.sort_by(|a, b| a.name.cmp(&b.name));
    folder
}

fn control_for(
    name: &str,
    parameter: &Parameter,
    config: &InspectorConfig,
) -> Option<DisplayControl> {
    let kind = ControlKind::for_debug_kind(parameter.debug_kind()?, config);
    let kind = match (kind, parameter.value()) {
        (ControlKind::Color, UniformValue::Color(_))
        | (ControlKind::TexturePath, UniformValue::Texture(_)) => kind,
        (ControlKind::IntRange(_) | ControlKind::FloatRange(_), _) => kind,
        // Debug kind and payload disagree; a slider can show anything numeric
        _ => ControlKind::FloatRange(config.float_range),
    };
    Some(DisplayControl {
        name: name.to_string(),
        kind,
        value: parameter.value().clone(),
    })
}

fn add_control_op(path: Vec<String>, control: &DisplayControl) -> UiOp {
    match (&control.kind, &control.value) {
        (ControlKind::Color, UniformValue::Color(color)) => UiOp::AddColorControl {
            path,
            value: *color,
        },
        (ControlKind::TexturePath, UniformValue::Texture(texture)) => UiOp::AddPathControl {
            path,
            value: texture.path.clone(),
        },
        (kind, value) => UiOp::AddRangeControl {
            path,
            range: kind.range().unwrap_or(RangeConfig::new(-1.0, 1.0, 0.05)),
            value: value.clone(),
        },
    }
}
