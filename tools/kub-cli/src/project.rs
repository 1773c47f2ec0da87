//! Editor graph used by the commands
//!
//! Mirrors the editor's root: a single material library persisted under
//! `materials`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use kub_core::{FieldMut, FieldRef, MaterialConfig, MaterialLibrary, SyncNode};

/// A vertex/fragment shader pair and who registers it
#[derive(Args, Debug, Clone)]
pub struct ShaderArgs {
    /// Material (consumer) name the parameters are registered for
    #[arg(short, long, default_value = "material")]
    pub consumer: String,

    /// Namespace every parameter by the consumer name
    #[arg(long)]
    pub unique: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Project {
    pub materials: MaterialLibrary,
}

impl SyncNode for Project {
    fn fields(&self) -> Vec<(&str, FieldRef<'_>)> {
        vec![("materials", FieldRef::Node(&self.materials))]
    }

    fn fields_mut(&mut self) -> Vec<(&str, FieldMut<'_>)> {
        vec![("materials", FieldMut::Node(&mut self.materials))]
    }
}

impl Project {
    /// Build the shader pair as a material
    pub fn add_shader_pair(
        &mut self,
        vertex: &Path,
        fragment: &Path,
        shader: &ShaderArgs,
    ) -> Result<()> {
        let (vertex_source, fragment_source) = read_pair(vertex, fragment)?;
        let config = MaterialConfig {
            lights: false,
            unique: shader.unique,
        };
        self.materials
            .add_material(&shader.consumer, &vertex_source, &fragment_source, config);
        Ok(())
    }
}

/// Read both stages of a shader
pub fn read_pair(vertex: &Path, fragment: &Path) -> Result<(String, String)> {
    let vertex_source = std::fs::read_to_string(vertex)
        .with_context(|| format!("Failed to read vertex shader: {}", vertex.display()))?;
    let fragment_source = std::fs::read_to_string(fragment)
        .with_context(|| format!("Failed to read fragment shader: {}", fragment.display()))?;
    Ok((vertex_source, fragment_source))
}

/// Texture cache following the user's config
pub fn texture_cache(asset_root: Option<&PathBuf>) -> kub_core::TextureCache {
    match asset_root {
        Some(root) => kub_core::TextureCache::with_asset_root(root.clone()),
        None => kub_core::TextureCache::new(),
    }
}
