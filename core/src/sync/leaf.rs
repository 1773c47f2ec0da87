//! Leaf entries of a persistence tree

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::texture::TextureResolver;
use crate::uniform::{Uniform, UniformType};

use super::SyncError;

/// One persisted uniform: `{"uniformType": "<tag>", "value": <payload>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedUniform {
    #[serde(rename = "uniformType")]
    pub uniform_type: String,
    #[serde(default)]
    pub value: Value,
}

impl PersistedUniform {
    pub fn from_uniform(uniform: &Uniform) -> Self {
        Self {
            uniform_type: uniform.uniform_type().as_str().to_string(),
            value: uniform.encode(),
        }
    }

    /// Read a leaf entry stored under `key`
    pub fn from_value(key: &str, raw: &Value) -> Result<Self, SyncError> {
        Self::deserialize(raw).map_err(|e| SyncError::MalformedLeaf {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("uniformType".to_string(), Value::String(self.uniform_type));
        map.insert("value".to_string(), self.value);
        Value::Object(map)
    }

    /// The stored tag; unknown tags are an error
    pub fn tag(&self) -> Result<UniformType, SyncError> {
        Ok(self.uniform_type.parse()?)
    }

    /// Decode with the stored tag
    pub fn decode(&self, textures: &mut dyn TextureResolver) -> Result<Uniform, SyncError> {
        Ok(Uniform::decode(self.tag()?, Some(&self.value), textures)?)
    }

    /// Decode against the tag of an existing uniform.
    ///
    /// The stored tag must still be a known one; if it differs from `ty` the
    /// payload is read as `ty` anyway.
    pub fn decode_as(
        &self,
        ty: UniformType,
        textures: &mut dyn TextureResolver,
    ) -> Result<Uniform, SyncError> {
        let stored = self.tag()?;
        if stored != ty {
            tracing::warn!(
                "Persisted {} value read as {} (the parameter's registered type)",
                stored,
                ty
            );
        }
        Ok(Uniform::decode(ty, Some(&self.value), textures)?)
    }
}
