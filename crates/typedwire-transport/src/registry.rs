//! Type registry mapping wire type tags to decode logic
//!
//! Tags are resolved against a table populated up front: the built-in
//! string and numeric tags, a handful of built-in [`Tagged`] types, and any
//! application types added with [`TypeRegistry::register`].

use std::any::TypeId;
use std::collections::HashMap;
use typedwire_core::{
    MarshallingError, MarshallingResult, Number, NumberKind, STRING_TAG, Tagged, TypeKind,
    TypedValue, Value,
};

type DecodeTypedFn = fn(serde_json::Value) -> Result<TypedValue, serde_json::Error>;

fn decode_tagged<T: Tagged>(json: serde_json::Value) -> Result<TypedValue, serde_json::Error> {
    serde_json::from_value::<T>(json).map(TypedValue::new)
}

/// Decode logic for one type tag
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    tag: &'static str,
    kind: TypeKind,
    type_id: Option<TypeId>,
    type_name: Option<&'static str>,
    decode_typed: Option<DecodeTypedFn>,
}

impl TypeDescriptor {
    fn text() -> Self {
        Self {
            tag: STRING_TAG,
            kind: TypeKind::Text,
            type_id: None,
            type_name: None,
            decode_typed: None,
        }
    }

    fn number(kind: NumberKind) -> Self {
        Self {
            tag: kind.tag(),
            kind: TypeKind::Number(kind),
            type_id: None,
            type_name: None,
            decode_typed: None,
        }
    }

    fn tagged<T: Tagged>() -> Self {
        Self {
            tag: T::TYPE_TAG,
            kind: T::SHAPE.into(),
            type_id: Some(TypeId::of::<T>()),
            type_name: Some(std::any::type_name::<T>()),
            decode_typed: Some(decode_tagged::<T>),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Rust type backing a [`Tagged`] descriptor; `None` for text and numbers
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Reconstruct a value from its natural JSON form
    ///
    /// Text requires a JSON string, numbers a JSON number that fits the
    /// width, and arrays a JSON array. Other types are handed to the
    /// registered type's `Deserialize` impl.
    pub fn decode(&self, json: serde_json::Value) -> MarshallingResult<Value> {
        match self.kind {
            TypeKind::Text => match json {
                serde_json::Value::String(text) => Ok(Value::Text(text)),
                other => Err(MarshallingError::mismatch(self.tag, "string", &other)),
            },
            TypeKind::Number(kind) => Number::from_json(kind, &json).map(Value::Number),
            TypeKind::Array if !json.is_array() => {
                Err(MarshallingError::mismatch(self.tag, "array", &json))
            }
            TypeKind::Array | TypeKind::Object => {
                let decode = self
                    .decode_typed
                    .ok_or_else(|| MarshallingError::UnknownType(self.tag.to_string()))?;
                decode(json).map(Value::Typed).map_err(MarshallingError::codec)
            }
        }
    }
}

/// Lookup table from type tag to [`TypeDescriptor`]
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<&'static str, TypeDescriptor>,
}

impl TypeRegistry {
    /// Registry with the built-in tags
    ///
    /// Built-ins: `string`, `i32`, `i64`, `u64`, `f64`, `bool`, `json`,
    /// `string[]`, `i32[]`, `i64[]`, `f64[]`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.insert(TypeDescriptor::text());
        for kind in NumberKind::ALL {
            registry.insert(TypeDescriptor::number(kind));
        }
        registry.insert(TypeDescriptor::tagged::<bool>());
        registry.insert(TypeDescriptor::tagged::<serde_json::Value>());
        registry.insert(TypeDescriptor::tagged::<Vec<String>>());
        registry.insert(TypeDescriptor::tagged::<Vec<i32>>());
        registry.insert(TypeDescriptor::tagged::<Vec<i64>>());
        registry.insert(TypeDescriptor::tagged::<Vec<f64>>());
        registry
    }

    /// Registry with no tags at all, not even `string`
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    fn insert(&mut self, descriptor: TypeDescriptor) {
        self.types.insert(descriptor.tag, descriptor);
    }

    /// Register an application type under its tag
    ///
    /// Registering the same type twice is a no-op. A tag already bound to a
    /// different type is rejected.
    pub fn register<T: Tagged>(&mut self) -> MarshallingResult<()> {
        let descriptor = TypeDescriptor::tagged::<T>();
        match self.types.get(descriptor.tag) {
            Some(existing) if existing.type_id == descriptor.type_id => Ok(()),
            Some(_) => Err(MarshallingError::DuplicateType(descriptor.tag.to_string())),
            None => {
                tracing::debug!(tag = descriptor.tag, "registered type");
                self.insert(descriptor);
                Ok(())
            }
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<T: Tagged>(mut self) -> MarshallingResult<Self> {
        self.register::<T>()?;
        Ok(self)
    }

    pub fn get(&self, tag: &str) -> Option<&TypeDescriptor> {
        self.types.get(tag)
    }

    /// Look up a tag, failing with [`MarshallingError::UnknownType`]
    pub fn resolve(&self, tag: &str) -> MarshallingResult<&TypeDescriptor> {
        self.get(tag)
            .ok_or_else(|| MarshallingError::UnknownType(tag.to_string()))
    }

    /// Check that `value` can be decoded by this registry
    ///
    /// The tag must be registered and, for typed values, bound to the
    /// value's own Rust type. A tag bound to another type or kind is a
    /// [`MarshallingError::TypeMismatch`].
    pub fn check(&self, value: &Value) -> MarshallingResult<()> {
        let descriptor = self.resolve(value.type_tag())?;
        match value {
            Value::Typed(typed) if descriptor.type_id != Some(typed.value_type_id()) => {
                Err(MarshallingError::TypeMismatch {
                    tag: descriptor.tag.to_string(),
                    expected: descriptor.type_name.unwrap_or(descriptor.kind.name()),
                    found: typed.type_name().to_string(),
                })
            }
            Value::Typed(_) => Ok(()),
            _ if descriptor.kind != value.kind() => Err(MarshallingError::TypeMismatch {
                tag: descriptor.tag.to_string(),
                expected: descriptor.type_name.unwrap_or(descriptor.kind.name()),
                found: value.kind().name().to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.types.contains_key(tag)
    }

    /// Registered tags, in no particular order
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
