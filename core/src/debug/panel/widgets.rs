//! Widget rendering for inspector controls

use crate::config::RangeConfig;
use crate::uniform::{Color, UniformValue};

use super::PanelControl;

const AXES: [&str; 4] = ["x", "y", "z", "w"];

/// Render a widget for a single control, editing its value in place
pub(super) fn render_control(ui: &mut egui::Ui, control: &mut PanelControl) {
    let range = control.range.unwrap_or(RangeConfig::new(-1.0, 1.0, 0.05));
    let name = control.name.as_str();

    match &mut control.value {
        UniformValue::Color(color) => {
            let mut rgb = color.to_f32_array();
            ui.horizontal(|ui| {
                if ui.color_edit_button_rgb(&mut rgb).changed() {
                    *color = Color::from_f32_array(rgb);
                }
                ui.label(name);
            });
        }
        UniformValue::Texture(texture) => {
            ui.horizontal(|ui| {
                ui.label(name);
                ui.monospace(&texture.path);
            });
        }
        // Range controls holding a bool
        UniformValue::Bool(v) => {
            ui.checkbox(v, name);
        }
        UniformValue::Int(v) => {
            ui.add(
                egui::Slider::new(v, range.min as i32..=range.max as i32)
                    .step_by(range.step)
                    .clamping(egui::SliderClamping::Edits)
                    .text(name),
            );
        }
        UniformValue::Float(v) => {
            ui.add(float_slider(v, range).text(name));
        }
        UniformValue::Vec2(v) => {
            ui.label(name);
            ui.add(float_slider(&mut v.x, range).text(AXES[0]));
            ui.add(float_slider(&mut v.y, range).text(AXES[1]));
        }
        UniformValue::Vec3(v) => {
            ui.label(name);
            ui.add(float_slider(&mut v.x, range).text(AXES[0]));
            ui.add(float_slider(&mut v.y, range).text(AXES[1]));
            ui.add(float_slider(&mut v.z, range).text(AXES[2]));
        }
        UniformValue::Vec4(v) => {
            ui.label(name);
            ui.add(float_slider(&mut v.x, range).text(AXES[0]));
            ui.add(float_slider(&mut v.y, range).text(AXES[1]));
            ui.add(float_slider(&mut v.z, range).text(AXES[2]));
            ui.add(float_slider(&mut v.w, range).text(AXES[3]));
        }
    }
}

fn float_slider(value: &mut f64, range: RangeConfig) -> egui::Slider<'_> {
    egui::Slider::new(value, range.min..=range.max)
        .step_by(range.step)
        .clamping(egui::SliderClamping::Edits)
}
