use super::UniformType;

/// Error type for uniform encoding and decoding
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The tag is not one of the supported uniform types
    #[error("unknown uniform type: {0}")]
    UnknownTypeTag(String),
    /// The stored payload cannot be represented by the tag
    #[error("cannot read {found} as a {expected} uniform")]
    PayloadMismatch { expected: UniformType, found: String },
    /// A replacement payload has a different tag than the uniform
    #[error("{found} payload cannot replace a {expected} uniform")]
    TypeMismatch {
        expected: UniformType,
        found: UniformType,
    },
}
