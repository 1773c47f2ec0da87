//! Shader parameter registry
//!
//! Owns every named uniform. Consumers register the names their shaders
//! declare and get back a [`ParameterId`]; registering a name that already
//! exists returns the existing parameter, so the first registration decides
//! the type. The rendering layer reads values through the registry and only
//! ever replaces payloads, never parameters.

mod node;

use hashbrown::HashMap;
use serde_json::Value;

use crate::classify::{PrefixPolicy, Scope, classify, policy_for, split_prefix};
use crate::texture::TextureResolver;
use crate::uniform::{CodecError, Uniform, UniformType, UniformValue};

/// Error type for registry access
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// No parameter is registered under this name
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("parameter '{name}': {source}")]
    Codec {
        name: String,
        #[source]
        source: CodecError,
    },
}

/// Index of a parameter inside its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterId(usize);

impl ParameterId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Who is registering, and whether their names are namespaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerScope {
    pub consumer: String,
    pub scope: Scope,
}

impl ConsumerScope {
    /// Names are used as declared
    pub fn shared(consumer: impl Into<String>) -> Self {
        Self {
            consumer: consumer.into(),
            scope: Scope::Shared,
        }
    }

    /// Names are prefixed with the consumer
    pub fn unique(consumer: impl Into<String>) -> Self {
        Self {
            consumer: consumer.into(),
            scope: Scope::Unique,
        }
    }
}

/// A named uniform and how it is persisted and displayed
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    identifier: String,
    bare_name: String,
    uniform: Uniform,
    persistent: bool,
    debug_visible: bool,
    debug_kind: Option<UniformType>,
    engine_fed: bool,
}

impl Parameter {
    /// Canonical (registry) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier as first declared
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Name without prefix letter or consumer namespace
    pub fn bare_name(&self) -> &str {
        &self.bare_name
    }

    pub fn uniform(&self) -> &Uniform {
        &self.uniform
    }

    pub fn value(&self) -> &UniformValue {
        self.uniform.value()
    }

    pub fn uniform_type(&self) -> UniformType {
        self.uniform.uniform_type()
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn is_debug_visible(&self) -> bool {
        self.debug_visible
    }

    /// Editor widget selector for debug-visible parameters
    pub fn debug_kind(&self) -> Option<UniformType> {
        self.debug_kind
    }

    pub fn is_engine_fed(&self) -> bool {
        self.engine_fed
    }
}

/// Mutable access to a parameter's payload during import and editing
pub struct ParameterMut<'a> {
    pub persistent: bool,
    pub uniform: &'a mut Uniform,
}

/// Insertion-ordered set of parameters, unique by canonical name
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    parameters: Vec<Parameter>,
    index: HashMap<String, ParameterId>,
}

impl ParameterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry key for a declared identifier under a consumer scope
    pub fn canonical_name(identifier: &str, ty: UniformType, scope: &ConsumerScope) -> String {
        let classification = classify(identifier, ty);
        if scope.scope == Scope::Unique || classification.policy.scope == Scope::Unique {
            format!("{}_{}", scope.consumer, classification.bare_name)
        } else {
            identifier.to_string()
        }
    }

    /// Register a declared uniform, or find the one already registered.
    ///
    /// A new parameter starts at the default value of its (color-adjusted)
    /// type with flags from its prefix. An existing one is returned as is.
    pub fn get_or_create(
        &mut self,
        identifier: &str,
        ty: UniformType,
        scope: &ConsumerScope,
    ) -> ParameterId {
        let name = Self::canonical_name(identifier, ty, scope);
        let classification = classify(identifier, ty);

        if let Some(id) = self.index.get(&name) {
            let existing = &self.parameters[id.0];
            if existing.uniform_type() != classification.ty {
                tracing::warn!(
                    "Parameter '{}' already registered as {}, ignoring request for {}",
                    name,
                    existing.uniform_type(),
                    classification.ty
                );
            }
            return *id;
        }

        let policy = classification.policy;
        tracing::debug!(
            "Registering parameter '{}' ({}) for {}",
            name,
            classification.ty,
            scope.consumer
        );
        self.insert(Parameter {
            name,
            identifier: identifier.to_string(),
            bare_name: classification.bare_name,
            uniform: Uniform::default_for(classification.ty),
            persistent: policy.persistent,
            debug_visible: policy.debug_visible,
            debug_kind: policy.debug_visible.then_some(classification.ty),
            engine_fed: policy.engine_fed,
        })
    }

    /// Flags for a persisted name no shader has declared yet.
    ///
    /// Prefixed names follow their prefix. Names without one were namespaced
    /// by their consumer (`fog_density`) and were persistent when saved.
    pub fn adopted_policy(name: &str) -> PrefixPolicy {
        split_prefix(name)
            .0
            .and_then(policy_for)
            .unwrap_or(PrefixPolicy {
                persistent: true,
                debug_visible: true,
                ..PrefixPolicy::PLAIN
            })
    }

    /// Take over a parameter found in persisted data before any shader
    /// declared it, so that the declaration finds the saved value.
    pub(crate) fn adopt(&mut self, name: &str, uniform: Uniform) -> ParameterId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let ty = uniform.uniform_type();
        let policy = Self::adopted_policy(name);
        tracing::debug!("Adopting persisted parameter '{}' ({})", name, ty);
        self.insert(Parameter {
            name: name.to_string(),
            identifier: name.to_string(),
            bare_name: split_prefix(name).1.to_string(),
            uniform,
            persistent: policy.persistent,
            debug_visible: policy.debug_visible,
            debug_kind: policy.debug_visible.then_some(ty),
            engine_fed: policy.engine_fed,
        })
    }

    fn insert(&mut self, parameter: Parameter) -> ParameterId {
        let id = ParameterId(self.parameters.len());
        self.index.insert(parameter.name.clone(), id);
        self.parameters.push(parameter);
        id
    }

    /// Decode `raw` against the parameter's type and store it
    pub fn set_value(
        &mut self,
        name: &str,
        raw: &Value,
        textures: &mut dyn TextureResolver,
    ) -> Result<(), RegistryError> {
        let id = self
            .id_of(name)
            .ok_or_else(|| RegistryError::UnknownParameter(name.to_string()))?;
        let parameter = &mut self.parameters[id.0];
        let decoded = Uniform::decode(parameter.uniform_type(), Some(raw), textures)
            .map_err(|source| RegistryError::Codec {
                name: name.to_string(),
                source,
            })?;
        parameter.uniform = decoded;
        Ok(())
    }

    /// Replace a parameter's payload with a value of the same type
    pub fn set(&mut self, id: ParameterId, value: UniformValue) -> Result<(), RegistryError> {
        let parameter = self
            .parameters
            .get_mut(id.0)
            .ok_or_else(|| RegistryError::UnknownParameter(format!("#{}", id.0)))?;
        parameter
            .uniform
            .set(value)
            .map_err(|source| RegistryError::Codec {
                name: parameter.name.clone(),
                source,
            })
    }

    /// Write the game time into every engine-fed `time` parameter.
    ///
    /// Returns how many parameters were updated.
    pub fn feed_time(&mut self, seconds: f64) -> usize {
        let mut updated = 0;
        for parameter in &mut self.parameters {
            if parameter.engine_fed
                && parameter.bare_name.eq_ignore_ascii_case("time")
                && parameter.uniform.set(UniformValue::Float(seconds)).is_ok()
            {
                updated += 1;
            }
        }
        updated
    }

    pub fn get(&self, id: ParameterId) -> Option<&Parameter> {
        self.parameters.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<ParameterId> {
        self.index.get(name).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Parameter> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// All parameters in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    pub fn persistent(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.persistent)
    }

    pub fn debug_visible(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.debug_visible)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameters as `(name, mutable payload)` pairs
    pub(crate) fn parameters_mut(&mut self) -> impl Iterator<Item = (&str, ParameterMut<'_>)> {
        self.parameters.iter_mut().map(|parameter| {
            let Parameter {
                name,
                uniform,
                persistent,
                ..
            } = parameter;
            (
                name.as_str(),
                ParameterMut {
                    persistent: *persistent,
                    uniform,
                },
            )
        })
    }
}
