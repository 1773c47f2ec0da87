//! Conversion between uniforms and plain JSON data
//!
//! Persisted shapes:
//! - `float`, `int`, `bool`: JSON scalars
//! - `vec2`/`vec3`/`vec4`: `{"x": .., "y": .., "z": .., "w": ..}` (arrays accepted on input)
//! - `color`: `{"r": .., "g": .., "b": ..}`
//! - `sampler2D`: the texture path string

use glam::{DVec2, DVec3, DVec4};
use serde_json::{Map, Value};

use crate::texture::{TextureHandle, TextureResolver};

use super::{CodecError, Color, TextureRef, Uniform, UniformType, UniformValue};

const VECTOR_KEYS: [&str; 4] = ["x", "y", "z", "w"];

/// Largest integer an `f64` represents exactly
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl Uniform {
    /// Decode a stored payload for `ty`.
    ///
    /// An absent payload (`None` or `null`) yields the default for the tag.
    /// Texture paths that fail to resolve fall back to the default handle.
    pub fn decode(
        ty: UniformType,
        raw: Option<&Value>,
        textures: &mut dyn TextureResolver,
    ) -> Result<Self, CodecError> {
        let raw = match raw {
            None | Some(Value::Null) => return Ok(Self::default_for(ty)),
            Some(raw) => raw,
        };

        let value = match ty {
            UniformType::Float => {
                UniformValue::Float(raw.as_f64().ok_or_else(|| mismatch(ty, raw))?)
            }
            UniformType::Int => {
                UniformValue::Int(decode_int(raw).ok_or_else(|| mismatch(ty, raw))?)
            }
            UniformType::Bool => {
                UniformValue::Bool(raw.as_bool().ok_or_else(|| mismatch(ty, raw))?)
            }
            UniformType::Vec2 => {
                let [x, y] = components(ty, raw)?;
                UniformValue::Vec2(DVec2::new(x, y))
            }
            UniformType::Vec3 => {
                let [x, y, z] = components(ty, raw)?;
                UniformValue::Vec3(DVec3::new(x, y, z))
            }
            UniformType::Vec4 => {
                let [x, y, z, w] = components(ty, raw)?;
                UniformValue::Vec4(DVec4::new(x, y, z, w))
            }
            UniformType::Color => {
                UniformValue::Color(decode_color(raw).ok_or_else(|| mismatch(ty, raw))?)
            }
            UniformType::Sampler2D => {
                let path = raw.as_str().ok_or_else(|| mismatch(ty, raw))?;
                let handle = textures.resolve(path).unwrap_or_else(|failure| {
                    tracing::warn!("{} - using default texture", failure);
                    TextureHandle::DEFAULT
                });
                UniformValue::Texture(TextureRef {
                    path: path.to_string(),
                    handle,
                })
            }
        };

        Ok(Self::new(value))
    }

    /// Encode the payload as plain data
    pub fn encode(&self) -> Value {
        encode_value(&self.value)
    }
}

/// Encode a payload as plain data
pub(crate) fn encode_value(value: &UniformValue) -> Value {
    match value {
        UniformValue::Float(v) => json_number(*v),
        UniformValue::Int(v) => Value::from(*v),
        UniformValue::Bool(v) => Value::Bool(*v),
        UniformValue::Vec2(v) => vector_object(&v.to_array()),
        UniformValue::Vec3(v) => vector_object(&v.to_array()),
        UniformValue::Vec4(v) => vector_object(&v.to_array()),
        UniformValue::Color(c) => {
            let mut map = Map::new();
            map.insert("r".to_string(), json_number(c.r));
            map.insert("g".to_string(), json_number(c.g));
            map.insert("b".to_string(), json_number(c.b));
            Value::Object(map)
        }
        UniformValue::Texture(texture) => Value::String(texture.path.clone()),
    }
}

/// Write a number the way a JSON document written by hand (or by a script
/// runtime) spells it: integral values without a fractional part.
pub fn json_number(v: f64) -> Value {
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_INT {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn mismatch(expected: UniformType, raw: &Value) -> CodecError {
    CodecError::PayloadMismatch {
        expected,
        found: raw.to_string(),
    }
}

fn decode_int(raw: &Value) -> Option<i32> {
    if let Some(v) = raw.as_i64() {
        return i32::try_from(v).ok();
    }
    let v = raw.as_f64()?;
    if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

fn decode_color(raw: &Value) -> Option<Color> {
    let map = raw.as_object()?;
    Some(Color::new(
        map.get("r")?.as_f64()?,
        map.get("g")?.as_f64()?,
        map.get("b")?.as_f64()?,
    ))
}

fn components<const N: usize>(ty: UniformType, raw: &Value) -> Result<[f64; N], CodecError> {
    let mut out = [0.0; N];
    match raw {
        Value::Object(map) => {
            for (slot, key) in out.iter_mut().zip(VECTOR_KEYS) {
                *slot = map
                    .get(key)
                    .and_then(Value::as_f64)
                    .ok_or_else(|| mismatch(ty, raw))?;
            }
        }
        Value::Array(items) if items.len() == N => {
            for (slot, item) in out.iter_mut().zip(items) {
                *slot = item.as_f64().ok_or_else(|| mismatch(ty, raw))?;
            }
        }
        _ => return Err(mismatch(ty, raw)),
    }
    Ok(out)
}

fn vector_object(components: &[f64]) -> Value {
    let map = components
        .iter()
        .zip(VECTOR_KEYS)
        .map(|(v, key)| (key.to_string(), json_number(*v)))
        .collect::<Map<String, Value>>();
    Value::Object(map)
}
