//! Debug inspector panel UI
//!
//! An [`InspectorHost`] that keeps the folders and controls it was told about
//! and renders them in an egui window.

use hashbrown::HashSet;

use super::edit::ControlEdit;
use super::host::InspectorHost;
use crate::config::{InspectorConfig, RangeConfig, parse_key_name};
use crate::texture::TextureHandle;
use crate::uniform::{Color, TextureRef, UniformValue};

mod widgets;

use widgets::render_control;

#[derive(Debug, Clone)]
struct PanelFolder {
    name: String,
    folders: Vec<PanelFolder>,
    controls: Vec<PanelControl>,
}

impl PanelFolder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folders: Vec::new(),
            controls: Vec::new(),
        }
    }

    fn folder_mut(&mut self, path: &[String]) -> Option<&mut PanelFolder> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self
                .folders
                .iter_mut()
                .find(|f| &f.name == head)?
                .folder_mut(rest),
        }
    }

    fn folder(&self, path: &[&str]) -> Option<&PanelFolder> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self.folders.iter().find(|f| f.name == *head)?.folder(rest),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct PanelControl {
    pub name: String,
    /// Slider bounds; `None` for color and path controls
    pub range: Option<RangeConfig>,
    pub value: UniformValue,
}

/// Debug inspector panel state
pub struct EguiInspector {
    /// Whether the panel is visible
    pub visible: bool,
    root: PanelFolder,
    /// Set of collapsed folder paths
    collapsed: HashSet<String>,
    /// Key that shows and hides the panel
    toggle_key: Option<egui::Key>,
}

impl Default for EguiInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiInspector {
    pub fn new() -> Self {
        Self {
            visible: true,
            root: PanelFolder::new(""),
            collapsed: HashSet::new(),
            toggle_key: Some(egui::Key::F3),
        }
    }

    /// Create a panel with the user's visibility and toggle key
    pub fn from_config(config: &InspectorConfig) -> Self {
        let toggle_key = parse_key_name(&config.panel_toggle).and_then(egui::Key::from_name);
        if toggle_key.is_none() {
            tracing::warn!("Unknown inspector toggle key '{}'", config.panel_toggle);
        }
        Self {
            visible: config.visible,
            toggle_key,
            ..Self::new()
        }
    }

    pub fn toggle_key(&self) -> Option<egui::Key> {
        self.toggle_key
    }

    /// Toggle visibility if the toggle key was pressed this frame
    pub fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        let Some(key) = self.toggle_key else {
            return false;
        };
        if ctx.input(|i| i.key_pressed(key)) {
            self.toggle();
            true
        } else {
            false
        }
    }

    /// Toggle panel visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn has_folder(&self, path: &[&str]) -> bool {
        self.root.folder(path).is_some()
    }

    /// Value currently shown by the control at `path`
    pub fn control_value(&self, path: &[&str]) -> Option<&UniformValue> {
        let (name, folders) = path.split_last()?;
        self.root
            .folder(folders)?
            .controls
            .iter()
            .find(|c| c.name == *name)
            .map(|c| &c.value)
    }

    /// Folder names directly below `path`
    pub fn folder_names(&self, path: &[&str]) -> Vec<&str> {
        self.root
            .folder(path)
            .map(|f| f.folders.iter().map(|f| f.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Render the inspector window.
    ///
    /// Returns the edits made by the user this frame.
    pub fn render(&mut self, ctx: &egui::Context) -> Vec<ControlEdit> {
        let mut edits = Vec::new();
        if !self.visible {
            return edits;
        }

        egui::Window::new("Inspector")
            .id(egui::Id::new("kub_inspector_window"))
            .default_pos([10.0, 10.0])
            .default_size([320.0, 400.0])
            .resizable(true)
            .collapsible(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        edits = self.show(ui);
                    });
            });

        edits
    }

    /// Render the folder tree into an existing ui
    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<ControlEdit> {
        let mut edits = Vec::new();
        let mut path = Vec::new();
        render_folder(ui, &mut self.root, &mut self.collapsed, &mut path, &mut edits);
        edits
    }

    fn parent_of<'a>(&mut self, path: &'a [String]) -> Option<(&mut PanelFolder, &'a String)> {
        let (name, folders) = path.split_last()?;
        let parent = self.root.folder_mut(folders);
        if parent.is_none() {
            tracing::warn!("Inspector has no folder at {}", folders.join("/"));
        }
        Some((parent?, name))
    }

    fn insert_control(&mut self, path: &[String], range: Option<RangeConfig>, value: UniformValue) {
        let Some((parent, name)) = self.parent_of(path) else {
            return;
        };
        let control = PanelControl {
            name: name.clone(),
            range,
            value,
        };
        match parent.controls.binary_search_by(|c| c.name.cmp(name)) {
            Ok(index) => parent.controls[index] = control,
            Err(index) => parent.controls.insert(index, control),
        }
    }
}

fn render_folder(
    ui: &mut egui::Ui,
    folder: &mut PanelFolder,
    collapsed: &mut HashSet<String>,
    path: &mut Vec<String>,
    edits: &mut Vec<ControlEdit>,
) {
    for control in &mut folder.controls {
        let before = control.value.clone();
        render_control(ui, control);
        if control.value != before {
            path.push(control.name.clone());
            if let Some(edit) = ControlEdit::from_path(path, control.value.clone()) {
                edits.push(edit);
            }
            path.pop();
        }
    }

    for child in &mut folder.folders {
        path.push(child.name.clone());
        let key = path.join("/");
        let is_collapsed = collapsed.contains(&key);

        let header = egui::CollapsingHeader::new(&child.name)
            .id_salt(&key)
            .default_open(!is_collapsed)
            .show(ui, |ui| render_folder(ui, child, collapsed, path, edits));

        // Track collapse state
        if header.header_response.clicked() {
            if is_collapsed {
                collapsed.remove(&key);
            } else {
                collapsed.insert(key);
            }
        }
        path.pop();
    }
}

impl InspectorHost for EguiInspector {
    fn add_folder(&mut self, path: &[String]) {
        let Some((parent, name)) = self.parent_of(path) else {
            return;
        };
        if let Err(index) = parent.folders.binary_search_by(|f| f.name.cmp(name)) {
            parent.folders.insert(index, PanelFolder::new(name.clone()));
        }
    }

    fn add_color_control(&mut self, path: &[String], value: Color) {
        self.insert_control(path, None, UniformValue::Color(value));
    }

    fn add_range_control(&mut self, path: &[String], range: RangeConfig, value: &UniformValue) {
        self.insert_control(path, Some(range), value.clone());
    }

    fn add_path_control(&mut self, path: &[String], value: &str) {
        let texture = TextureRef {
            path: value.to_string(),
            handle: TextureHandle::DEFAULT,
        };
        self.insert_control(path, None, UniformValue::Texture(texture));
    }

    fn set_control_value(&mut self, path: &[String], value: &UniformValue) {
        let Some((parent, name)) = self.parent_of(path) else {
            return;
        };
        if let Some(control) = parent.controls.iter_mut().find(|c| &c.name == name) {
            control.value = value.clone();
        }
    }

    fn remove_node(&mut self, path: &[String]) {
        let Some((parent, name)) = self.parent_of(path) else {
            return;
        };
        parent.folders.retain(|f| &f.name != name);
        parent.controls.retain(|c| &c.name != name);
    }
}
