//! Shader materials and their parameter bindings
//!
//! A material is a shader program plus the registry parameters its uniforms
//! are bound to. Materials are cached by name, so each distinct program
//! registers its parameters exactly once.

use hashbrown::HashMap;

use crate::classify::scan_declarations;
use crate::registry::{ConsumerScope, Parameter, ParameterId, ParameterRegistry};
use crate::sync::{DataTree, FieldMut, FieldRef, SyncError, SyncNode};
use crate::texture::TextureResolver;

/// Options for building a material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialConfig {
    /// The renderer should merge its light uniforms into this material
    pub lights: bool,
    /// Every parameter of this material is namespaced by the material name
    pub unique: bool,
}

/// A declared uniform and the parameter that feeds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBinding {
    /// Identifier as written in the shader
    pub identifier: String,
    pub parameter: ParameterId,
}

#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    vertex_shader: String,
    fragment_shader: String,
    config: MaterialConfig,
    bindings: Vec<UniformBinding>,
}

impl Material {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_shader(&self) -> &str {
        &self.vertex_shader
    }

    pub fn fragment_shader(&self) -> &str {
        &self.fragment_shader
    }

    pub fn config(&self) -> MaterialConfig {
        self.config
    }

    /// Uniform bindings in declaration order
    pub fn bindings(&self) -> &[UniformBinding] {
        &self.bindings
    }

    /// Parameter bound to a shader identifier
    pub fn binding(&self, identifier: &str) -> Option<ParameterId> {
        self.bindings
            .iter()
            .find(|b| b.identifier == identifier)
            .map(|b| b.parameter)
    }
}

/// Material cache sharing one parameter registry
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    index: HashMap<String, usize>,
    registry: ParameterRegistry,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a material, or return the one already cached under `name`.
    ///
    /// Every supported uniform declared by the two stages is registered with
    /// the registry using the material name as consumer.
    pub fn add_material(
        &mut self,
        name: &str,
        vertex_shader: &str,
        fragment_shader: &str,
        config: MaterialConfig,
    ) -> &Material {
        if let Some(&index) = self.index.get(name) {
            let cached = &self.materials[index];
            if cached.vertex_shader != vertex_shader || cached.fragment_shader != fragment_shader {
                tracing::warn!(
                    "Material '{}' already built from different sources, keeping the first",
                    name
                );
            }
            return &self.materials[index];
        }

        let scope = if config.unique {
            ConsumerScope::unique(name)
        } else {
            ConsumerScope::shared(name)
        };

        let bindings: Vec<UniformBinding> = scan_declarations(vertex_shader, fragment_shader)
            .into_iter()
            .map(|declaration| UniformBinding {
                parameter: self.registry.get_or_create(
                    &declaration.identifier,
                    declaration.declared_type,
                    &scope,
                ),
                identifier: declaration.identifier,
            })
            .collect();

        tracing::info!("Material '{}' built with {} uniforms", name, bindings.len());

        let index = self.materials.len();
        self.materials.push(Material {
            name: name.to_string(),
            vertex_shader: vertex_shader.to_string(),
            fragment_shader: fragment_shader.to_string(),
            config,
            bindings,
        });
        self.index.insert(name.to_string(), index);
        &self.materials[index]
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.index.get(name).map(|&index| &self.materials[index])
    }

    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ParameterRegistry {
        &mut self.registry
    }

    /// The parameter feeding `identifier` in material `material`
    pub fn uniform_for(&self, material: &str, identifier: &str) -> Option<&Parameter> {
        let id = self.material(material)?.binding(identifier)?;
        self.registry.get(id)
    }

    /// Forward the game clock to engine-fed parameters
    pub fn feed_time(&mut self, seconds: f64) -> usize {
        self.registry.feed_time(seconds)
    }
}

/// Persisted as the registry's flat parameter map; shown as a `uniforms` folder.
impl SyncNode for MaterialLibrary {
    fn fields(&self) -> Vec<(&str, FieldRef<'_>)> {
        vec![("uniforms", FieldRef::Node(&self.registry))]
    }

    fn fields_mut(&mut self) -> Vec<(&str, FieldMut<'_>)> {
        vec![("uniforms", FieldMut::Node(&mut self.registry))]
    }

    fn debug_visible(&self) -> bool {
        true
    }

    fn adopts_unknown_keys(&self) -> bool {
        true
    }

    fn export_to(&self, tree: &mut DataTree) -> Result<(), SyncError> {
        self.registry.export_to(tree)
    }

    fn import_from(
        &mut self,
        tree: &DataTree,
        textures: &mut dyn TextureResolver,
    ) -> Result<(), SyncError> {
        self.registry.import_from(tree, textures)
    }
}
