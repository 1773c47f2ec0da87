//! Integration tests for the Kub core framework
//!
//! Tests the full path of a parameter: shader declaration, registration,
//! loading saved data, inspector display and editing, and saving again.

#[cfg(test)]
mod tests {
    use crate::config::KubConfig;
    use crate::debug::{ControlEdit, DebugInspector, EguiInspector, InspectorHost};
    use crate::material::{MaterialConfig, MaterialLibrary};
    use crate::persist::{load_tree, parse_tree, save_tree};
    use crate::sync::{self, FieldMut, FieldRef, SyncNode};
    use crate::texture::{TextureCache, TextureHandle};
    use crate::uniform::{TextureRef, UniformValue};

    // ============================================================================
    // Test Scene
    // ============================================================================

    const FOG_VERTEX: &str = r#"
uniform float eTime;
varying vec2 vUv;
void main() {
    vUv = uv;
    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

    const FOG_FRAGMENT: &str = r#"
uniform vec3 p_fogColor;
uniform float p_density;
uniform sampler2D u_noise;
uniform sampler2D p_mask;
varying vec2 vUv;
void main() {
    float n = texture2D(u_noise, vUv + eTime).r;
    gl_FragColor = vec4(p_fogColor, n * p_density * texture2D(p_mask, vUv).r);
}
"#;

    const SAVED: &str = r#"{
  "materials": {
    "p_density": {"uniformType": "float", "value": 0.7},
    "p_mask": {"uniformType": "sampler2D", "value": "./texture/mask.png"},
    "p_legacy": {"uniformType": "vec2", "value": {"x": 0.5, "y": 0.25}}
  },
  "camera": {"p_fov": {"uniformType": "float", "value": 50}}
}"#;

    /// Minimal editor root: one material library
    #[derive(Debug, Clone, Default)]
    struct Editor {
        materials: MaterialLibrary,
    }

    impl SyncNode for Editor {
        fn fields(&self) -> Vec<(&str, FieldRef<'_>)> {
            vec![("materials", FieldRef::Node(&self.materials))]
        }

        fn fields_mut(&mut self) -> Vec<(&str, FieldMut<'_>)> {
            vec![("materials", FieldMut::Node(&mut self.materials))]
        }
    }

    fn value_of(editor: &Editor, name: &str) -> UniformValue {
        editor
            .materials
            .registry()
            .get_by_name(name)
            .unwrap_or_else(|| panic!("{name} not registered"))
            .value()
            .clone()
    }

    // ============================================================================
    // Load -> declare -> inspect -> edit -> save
    // ============================================================================

    #[test]
    fn test_editor_session() {
        let config = KubConfig::default();
        let mut textures = TextureCache::new();
        let mut editor = Editor::default();

        // Saved data arrives before any shader is compiled
        let saved = parse_tree(SAVED).unwrap();
        sync::import(&mut editor, &saved, &mut textures).unwrap();
        assert_eq!(sync::ignored_keys(&editor, &saved), ["camera"]);

        // Declarations pick up the saved values
        editor.materials.add_material(
            "fog",
            FOG_VERTEX,
            FOG_FRAGMENT,
            MaterialConfig::default(),
        );
        assert_eq!(value_of(&editor, "p_density"), UniformValue::Float(0.7));
        let mask = editor.materials.uniform_for("fog", "p_mask").unwrap();
        match mask.value() {
            UniformValue::Texture(TextureRef { path, handle }) => {
                assert_eq!(path, "./texture/mask.png");
                assert_ne!(*handle, TextureHandle::DEFAULT);
            }
            other => panic!("unexpected mask value {other:?}"),
        }
        assert_eq!(
            editor.materials.uniform_for("fog", "u_noise").unwrap().name(),
            "fog_noise"
        );

        // Inspector shows persisted and declared parameters
        let mut inspector = DebugInspector::new(config.inspector.clone());
        let mut panel = EguiInspector::new();
        inspector.update(&editor, &mut panel);
        assert!(panel.has_folder(&["materials", "uniforms"]));
        assert_eq!(
            panel.control_value(&["materials", "uniforms", "p_legacy"]),
            Some(&UniformValue::Vec2(glam::DVec2::new(0.5, 0.25)))
        );
        assert!(panel.control_value(&["materials", "uniforms", "eTime"]).is_none());

        // The clock never reaches the saved document
        editor.materials.feed_time(12.5);

        // The user drags a slider: the panel already shows the value, the
        // registry takes it, and the next tick leaves the control alone
        let slider = ["materials", "uniforms", "p_density"].map(String::from);
        panel.set_control_value(&slider, &UniformValue::Float(0.35));
        let edit = ControlEdit::from_path(&slider, UniformValue::Float(0.35)).unwrap();
        inspector.apply_edit(&mut editor, &edit).unwrap();
        assert_eq!(inspector.update(&editor, &mut panel), 0);
        assert_eq!(
            panel.control_value(&["materials", "uniforms", "p_density"]),
            Some(&UniformValue::Float(0.35))
        );

        // Save, reload into a fresh editor, and compare
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&config.data.save_path);
        let exported = sync::export(&editor).unwrap();
        save_tree(&path, &exported, config.data.pretty).unwrap();

        let reloaded_tree = load_tree(&path).unwrap();
        assert_eq!(reloaded_tree, exported);
        let materials = reloaded_tree["materials"].as_object().unwrap();
        let keys: Vec<&str> = materials.keys().map(String::as_str).collect();
        assert_eq!(keys, ["p_density", "p_mask", "p_legacy", "p_fogColor"]);
        assert!(!materials.contains_key("eTime"));
        assert!(!materials.contains_key("fog_noise"));

        let mut reloaded = Editor::default();
        sync::import(&mut reloaded, &reloaded_tree, &mut textures).unwrap();
        assert_eq!(sync::export(&reloaded).unwrap(), exported);
        assert_eq!(value_of(&reloaded, "p_density"), UniformValue::Float(0.35));
    }

    #[test]
    fn test_bad_document_leaves_editor_intact() {
        let mut textures = TextureCache::new();
        let mut editor = Editor::default();
        editor
            .materials
            .add_material("fog", FOG_VERTEX, FOG_FRAGMENT, MaterialConfig::default());
        let before = sync::export(&editor).unwrap();

        let bad = parse_tree(
            r#"{"materials": {
                "p_density": {"uniformType": "float", "value": 0.1},
                "p_fogColor": {"uniformType": "color", "value": "pink"}
            }}"#,
        )
        .unwrap();
        assert!(sync::import(&mut editor, &bad, &mut textures).is_err());
        assert_eq!(sync::export(&editor).unwrap(), before);
    }

    #[test]
    fn test_unresolvable_texture_falls_back_to_default_handle() {
        let assets = tempfile::tempdir().unwrap();
        let mut textures = TextureCache::with_asset_root(assets.path());
        let mut editor = Editor::default();
        let saved = parse_tree(
            r#"{"materials": {"p_mask": {"uniformType": "sampler2D", "value": "./texture/gone.png"}}}"#,
        )
        .unwrap();

        sync::import(&mut editor, &saved, &mut textures).unwrap();

        assert_eq!(
            value_of(&editor, "p_mask"),
            UniformValue::Texture(TextureRef {
                path: "./texture/gone.png".to_string(),
                handle: TextureHandle::DEFAULT,
            })
        );
        // The path survives for the next save
        assert_eq!(sync::export(&editor).unwrap(), saved);
    }
}
