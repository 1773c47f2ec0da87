//! Shader uniform discovery and classification
//!
//! A consumer hands over the two stages of a shader program. Both are searched
//! as one text for `uniform <type> <name>;` declarations; stage and order do
//! not matter, only the set of names. Each name is classified by its prefix
//! letter (see [`prefix`]) and `vec3`s that are named like colors become
//! `color` parameters.

pub mod prefix;
#[cfg(test)]
mod tests;

use std::sync::LazyLock;

use hashbrown::HashSet;
use regex::Regex;

use crate::uniform::UniformType;

pub use prefix::{PREFIX_POLICIES, PrefixPolicy, Scope, policy_for, split_prefix};

static UNIFORM_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buniform\s+(?:(?:lowp|mediump|highp)\s+)?(\w+)\s+(\w+)\s*;")
        .expect("uniform declaration pattern is valid")
});

/// How a declared uniform behaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Name without its prefix letter
    pub bare_name: String,
    /// Tag after the color convention has been applied
    pub ty: UniformType,
    pub policy: PrefixPolicy,
}

/// A uniform declared in shader source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Identifier as written in the shader
    pub identifier: String,
    /// Type as written in the shader
    pub declared_type: UniformType,
    pub classification: Classification,
}

/// Whether a bare name asks for a color editor
pub fn is_color_name(bare_name: &str) -> bool {
    let lower = bare_name.to_ascii_lowercase();
    lower.contains("color") || lower.contains("colour")
}

/// Classify a declared identifier
pub fn classify(identifier: &str, declared_type: UniformType) -> Classification {
    let (prefix, bare) = split_prefix(identifier);
    let policy = prefix.and_then(policy_for).unwrap_or(PrefixPolicy::PLAIN);

    let ty = if declared_type == UniformType::Vec3 && is_color_name(bare) {
        UniformType::Color
    } else {
        declared_type
    };

    Classification {
        bare_name: bare.to_string(),
        ty,
        policy,
    }
}

/// Find and classify every uniform declared across both stages.
///
/// Names are unique in the result; the first declaration of a name wins.
pub fn scan_declarations(vertex: &str, fragment: &str) -> Vec<Declaration> {
    let source = format!("{vertex}\n{fragment}");
    let mut seen = HashSet::new();
    let mut declarations = Vec::new();

    for captures in UNIFORM_DECL.captures_iter(&source) {
        let type_name = &captures[1];
        let identifier = &captures[2];

        let Some(declared_type) = UniformType::from_shader_type(type_name) else {
            tracing::debug!("Ignoring uniform '{}' of unsupported type {}", identifier, type_name);
            continue;
        };

        if !seen.insert(identifier.to_string()) {
            continue;
        }

        declarations.push(Declaration {
            identifier: identifier.to_string(),
            declared_type,
            classification: classify(identifier, declared_type),
        });
    }

    declarations
}
