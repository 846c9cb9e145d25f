//! Error types for message marshalling

use thiserror::Error;

/// Result type alias for marshalling operations
pub type MarshallingResult<T> = Result<T, MarshallingError>;

/// Boxed underlying cause carried by [`MarshallingError::Codec`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for encode and decode operations
///
/// Every failure in the codec surfaces as one of these variants. None of
/// them is ever accompanied by partial output.
#[derive(Error, Debug)]
pub enum MarshallingError {
    /// The JSON codec failed to read or write a document
    #[error("codec error: {message}")]
    Codec {
        message: String,
        #[source]
        source: BoxError,
    },

    /// A required envelope member is absent
    #[error("missing envelope field: {0}")]
    MissingField(&'static str),

    /// A type tag has no entry in the type registry
    #[error("unknown type tag: {0}")]
    UnknownType(String),

    /// The JSON shape does not match what the type tag requires
    #[error("type mismatch for '{tag}': expected {expected}, found {found}")]
    TypeMismatch {
        tag: String,
        expected: &'static str,
        found: String,
    },

    /// A nested header entry could not be decoded
    #[error("malformed header '{key}': {reason}")]
    MalformedHeader { key: String, reason: String },

    /// A well-known property string could not be parsed
    #[error("invalid property {name}: '{value}'")]
    InvalidProperty {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// NaN and infinities have no JSON representation
    #[error("non-finite number cannot be encoded: {0}")]
    NonFiniteNumber(f64),

    /// Two different Rust types were registered under the same tag
    #[error("type tag already registered: {0}")]
    DuplicateType(String),
}

impl MarshallingError {
    /// Returns a stable numeric code for the error variant
    pub fn error_code(&self) -> u32 {
        match self {
            MarshallingError::Codec { .. } => 1,
            MarshallingError::MissingField(_) => 2,
            MarshallingError::UnknownType(_) => 3,
            MarshallingError::TypeMismatch { .. } => 4,
            MarshallingError::MalformedHeader { .. } => 5,
            MarshallingError::InvalidProperty { .. } => 6,
            MarshallingError::NonFiniteNumber(_) => 7,
            MarshallingError::DuplicateType(_) => 8,
        }
    }

    /// Wrap an arbitrary codec-level failure
    pub fn codec(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        MarshallingError::Codec {
            message: err.to_string(),
            source: Box::new(err),
        }
    }

    /// Describe a JSON value whose shape does not fit the tag
    pub fn mismatch(tag: &str, expected: &'static str, found: &serde_json::Value) -> Self {
        MarshallingError::TypeMismatch {
            tag: tag.to_string(),
            expected,
            found: json_kind(found).to_string(),
        }
    }
}

impl From<serde_json::Error> for MarshallingError {
    fn from(err: serde_json::Error) -> Self {
        MarshallingError::codec(err)
    }
}

/// Short name of a JSON value's shape, used in mismatch messages
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
