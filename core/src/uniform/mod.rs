//! Typed uniform values
//!
//! A [`Uniform`] is a payload paired with a [`UniformType`] tag that is fixed at
//! creation. The closed set of tags mirrors the shader types the editor
//! understands, plus `color`, which has no shader spelling of its own.
//!
//! Scalars and vector components are held as `f64` so that values read from a
//! persisted document are written back unchanged.

mod codec;
mod error;

pub use codec::json_number;
pub use error::CodecError;

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, DVec3, DVec4};

use crate::texture::{DEFAULT_TEXTURE_PATH, TextureHandle};

/// Type tag of a uniform value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Float,
    Int,
    Bool,
    Vec2,
    Vec3,
    Vec4,
    Color,
    Sampler2D,
}

impl UniformType {
    /// Every supported tag, in declaration order
    pub const ALL: [UniformType; 8] = [
        UniformType::Float,
        UniformType::Int,
        UniformType::Bool,
        UniformType::Vec2,
        UniformType::Vec3,
        UniformType::Vec4,
        UniformType::Color,
        UniformType::Sampler2D,
    ];

    /// Spelling used in persisted data and shader source
    pub fn as_str(&self) -> &'static str {
        match self {
            UniformType::Float => "float",
            UniformType::Int => "int",
            UniformType::Bool => "bool",
            UniformType::Vec2 => "vec2",
            UniformType::Vec3 => "vec3",
            UniformType::Vec4 => "vec4",
            UniformType::Color => "color",
            UniformType::Sampler2D => "sampler2D",
        }
    }

    /// Tags that can appear in a shader declaration (`color` cannot)
    pub fn from_shader_type(name: &str) -> Option<Self> {
        match name {
            "color" => None,
            other => other.parse().ok(),
        }
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UniformType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UniformType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| CodecError::UnknownTypeTag(s.to_string()))
    }
}

/// Linear RGB color, one `f64` per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Hot pink, the color of a parameter nobody has tuned yet
    pub const DEFAULT: Color = Color::from_hex(0xff69b4);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f64 / 255.0,
            g: ((hex >> 8) & 0xff) as f64 / 255.0,
            b: (hex & 0xff) as f64 / 255.0,
        }
    }

    pub fn to_f32_array(&self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    pub fn from_f32_array([r, g, b]: [f32; 3]) -> Self {
        Self::new(r as f64, g as f64, b as f64)
    }
}

/// A texture payload: the resolved handle and the path it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    pub path: String,
    pub handle: TextureHandle,
}

impl Default for TextureRef {
    fn default() -> Self {
        Self {
            path: DEFAULT_TEXTURE_PATH.to_string(),
            handle: TextureHandle::DEFAULT,
        }
    }
}

/// Payload of a uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f64),
    Int(i32),
    Bool(bool),
    Vec2(DVec2),
    Vec3(DVec3),
    Vec4(DVec4),
    Color(Color),
    Texture(TextureRef),
}

impl UniformValue {
    /// Default payload for a tag
    pub fn default_for(ty: UniformType) -> Self {
        match ty {
            UniformType::Float => UniformValue::Float(1.0),
            UniformType::Int => UniformValue::Int(1),
            UniformType::Bool => UniformValue::Bool(false),
            UniformType::Vec2 => UniformValue::Vec2(DVec2::ONE),
            UniformType::Vec3 => UniformValue::Vec3(DVec3::ONE),
            UniformType::Vec4 => UniformValue::Vec4(DVec4::ONE),
            UniformType::Color => UniformValue::Color(Color::DEFAULT),
            UniformType::Sampler2D => UniformValue::Texture(TextureRef::default()),
        }
    }

    /// Tag this payload is representable by
    pub fn uniform_type(&self) -> UniformType {
        match self {
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::Bool(_) => UniformType::Bool,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Color(_) => UniformType::Color,
            UniformValue::Texture(_) => UniformType::Sampler2D,
        }
    }

    /// Numeric view for slider widgets
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            UniformValue::Float(v) => Some(*v),
            UniformValue::Int(v) => Some(*v as f64),
            UniformValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

/// A payload with an immutable type tag
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    ty: UniformType,
    value: UniformValue,
}

impl Uniform {
    /// Wrap a payload; the tag is taken from the payload
    pub fn new(value: UniformValue) -> Self {
        Self {
            ty: value.uniform_type(),
            value,
        }
    }

    /// A uniform holding the default payload for `ty`
    pub fn default_for(ty: UniformType) -> Self {
        Self::new(UniformValue::default_for(ty))
    }

    pub fn uniform_type(&self) -> UniformType {
        self.ty
    }

    pub fn value(&self) -> &UniformValue {
        &self.value
    }

    /// Replace the payload, keeping the tag
    pub fn set(&mut self, value: UniformValue) -> Result<(), CodecError> {
        if value.uniform_type() != self.ty {
            return Err(CodecError::TypeMismatch {
                expected: self.ty,
                found: value.uniform_type(),
            });
        }
        self.value = value;
        Ok(())
    }
}
