//! Inspector UI host interface

use crate::config::RangeConfig;
use crate::uniform::{Color, UniformValue};

/// Widget toolkit side of the inspector.
///
/// Paths are folder names from the inspector root; for controls the last
/// element is the control name. The host renders; it never decides structure.
pub trait InspectorHost {
    fn add_folder(&mut self, path: &[String]);
    fn add_color_control(&mut self, path: &[String], value: Color);
    fn add_range_control(&mut self, path: &[String], range: RangeConfig, value: &UniformValue);
    fn add_path_control(&mut self, path: &[String], value: &str);
    fn set_control_value(&mut self, path: &[String], value: &UniformValue);
    /// Remove a folder (with everything in it) or a control
    fn remove_node(&mut self, path: &[String]);
}
