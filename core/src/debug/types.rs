//! Debug inspector type definitions
//!
//! Snapshot of what the inspector host is showing. Folders and controls are
//! keyed by name within their parent and kept sorted by name.

use crate::config::{InspectorConfig, RangeConfig};
use crate::uniform::{UniformType, UniformValue};

/// Editor widget for a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    /// Color swatch
    Color,
    /// Texture path display
    TexturePath,
    /// Stepped integer slider
    IntRange(RangeConfig),
    /// Stepped fractional slider
    FloatRange(RangeConfig),
}

impl ControlKind {
    /// Pick the widget for a parameter's debug kind
    pub fn for_debug_kind(kind: UniformType, config: &InspectorConfig) -> Self {
        match kind {
            UniformType::Color => ControlKind::Color,
            UniformType::Sampler2D => ControlKind::TexturePath,
            UniformType::Int => ControlKind::IntRange(config.int_range),
            _ => ControlKind::FloatRange(config.float_range),
        }
    }

    /// Slider bounds, if this is a range control
    pub fn range(&self) -> Option<RangeConfig> {
        match self {
            ControlKind::IntRange(range) | ControlKind::FloatRange(range) => Some(*range),
            ControlKind::Color | ControlKind::TexturePath => None,
        }
    }
}

/// A displayed editor control
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayControl {
    pub name: String,
    pub kind: ControlKind,
    /// Value last pushed into the control
    pub value: UniformValue,
}

/// A displayed folder
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayFolder {
    pub name: String,
    pub folders: Vec<DisplayFolder>,
    pub controls: Vec<DisplayControl>,
}

impl DisplayFolder {
    /// The top-level folder of an inspector
    pub fn root() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Nothing is shown inside this folder
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty() && self.folders.iter().all(DisplayFolder::is_empty)
    }

    pub fn folder(&self, name: &str) -> Option<&DisplayFolder> {
        self.folders.iter().find(|f| f.name == name)
    }

    pub fn control(&self, name: &str) -> Option<&DisplayControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    /// Control `name` inside the folder reached by `folders`
    pub fn control_mut(&mut self, folders: &[String], name: &str) -> Option<&mut DisplayControl> {
        match folders.split_first() {
            None => self.controls.iter_mut().find(|c| c.name == name),
            Some((head, rest)) => self
                .folders
                .iter_mut()
                .find(|f| &f.name == head)?
                .control_mut(rest, name),
        }
    }

    /// Follow a path of folder names
    pub fn descendant(&self, path: &[&str]) -> Option<&DisplayFolder> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self.folder(head)?.descendant(rest),
        }
    }

    /// Number of controls in this folder and below
    pub fn control_count(&self) -> usize {
        self.controls.len() + self.folders.iter().map(DisplayFolder::control_count).sum::<usize>()
    }
}
