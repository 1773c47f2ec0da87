//! Kub Core - typed shader parameters and data synchronization
//!
//! This crate moves typed values between three places: the live object graph
//! of the editor, a persisted data document, and a debug inspector UI.
//!
//! # Architecture
//!
//! - [`Uniform`] - A value with an immutable type tag, and its JSON codec
//! - [`classify`] - Finds uniforms in shader sources and reads their name prefixes
//! - [`ParameterRegistry`] - Owns every named parameter; [`MaterialLibrary`] feeds it
//! - [`sync`] - Exports the graph to a data tree and imports it back
//! - [`debug`] - Reconciles an inspector tree against the graph

pub mod classify;
pub mod config;
pub mod debug;
#[cfg(test)]
mod integration;
pub mod material;
pub mod persist;
pub mod registry;
pub mod sync;
pub mod texture;
pub mod uniform;

// Re-export core types
pub use classify::{Classification, Declaration, PrefixPolicy, Scope, classify, scan_declarations};
pub use config::{InspectorConfig, KubConfig};
pub use material::{Material, MaterialConfig, MaterialLibrary, UniformBinding};
pub use persist::{PersistError, load_tree, save_tree};
pub use registry::{ConsumerScope, Parameter, ParameterId, ParameterRegistry, RegistryError};
pub use sync::{
    Capabilities, DataTree, FieldMut, FieldRef, PersistedUniform, SyncError, SyncNode, export,
    ignored_keys, import,
};
pub use texture::{TextureCache, TextureHandle, TextureResolver};
pub use uniform::{CodecError, Color, TextureRef, Uniform, UniformType, UniformValue};
