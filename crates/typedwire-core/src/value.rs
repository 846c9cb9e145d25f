//! Typed values carried as message payloads and header values
//!
//! A [`Value`] is one of three categories, each of which maps onto a
//! distinct wire treatment:
//! - [`Value::Text`] and [`Value::Number`] are written as native JSON scalars.
//! - [`Value::Typed`] wraps any [`Tagged`] type (arrays and structured
//!   objects) and is reconstructed through the type registry.

use crate::error::{MarshallingError, MarshallingResult};
use serde::{Serialize, de::DeserializeOwned};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Type tag for [`Value::Text`]
pub const STRING_TAG: &str = "string";

/// Width of a numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    I32,
    I64,
    U64,
    F64,
}

impl NumberKind {
    /// All numeric kinds, in registration order
    pub const ALL: [NumberKind; 4] = [
        NumberKind::I32,
        NumberKind::I64,
        NumberKind::U64,
        NumberKind::F64,
    ];

    /// Type tag written to the wire for this kind
    pub fn tag(self) -> &'static str {
        match self {
            NumberKind::I32 => "i32",
            NumberKind::I64 => "i64",
            NumberKind::U64 => "u64",
            NumberKind::F64 => "f64",
        }
    }

    /// Look up a numeric kind by its type tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        NumberKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// JSON shape of a [`Tagged`] type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Serializes to a JSON array
    Array,
    /// Serializes to any other JSON value (usually an object)
    Object,
}

/// Decoding category resolved from a type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Text,
    Number(NumberKind),
    Array,
    Object,
}

impl TypeKind {
    /// Short name used in mismatch messages
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Text => "string",
            TypeKind::Number(kind) => kind.tag(),
            TypeKind::Array => "array",
            TypeKind::Object => "object",
        }
    }
}

impl From<Shape> for TypeKind {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Array => TypeKind::Array,
            Shape::Object => TypeKind::Object,
        }
    }
}

/// A numeric value with an explicit width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I32(i32),
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::I32(_) => NumberKind::I32,
            Number::I64(_) => NumberKind::I64,
            Number::U64(_) => NumberKind::U64,
            Number::F64(_) => NumberKind::F64,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind().tag()
    }

    /// Lossy conversion for numeric comparisons
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::I32(v) => f64::from(v),
            Number::I64(v) => v as f64,
            Number::U64(v) => v as f64,
            Number::F64(v) => v,
        }
    }

    /// Render as a native JSON number
    ///
    /// Fails for NaN and infinities, which JSON cannot express.
    pub fn to_json(&self) -> MarshallingResult<serde_json::Value> {
        let number = match *self {
            Number::I32(v) => serde_json::Number::from(v),
            Number::I64(v) => serde_json::Number::from(v),
            Number::U64(v) => serde_json::Number::from(v),
            Number::F64(v) => {
                serde_json::Number::from_f64(v).ok_or(MarshallingError::NonFiniteNumber(v))?
            }
        };
        Ok(serde_json::Value::Number(number))
    }

    /// Read a native JSON number as the given width
    ///
    /// Integers that do not fit the width are rejected rather than truncated.
    pub fn from_json(kind: NumberKind, value: &serde_json::Value) -> MarshallingResult<Self> {
        let mismatch = || MarshallingError::mismatch(kind.tag(), kind.tag(), value);
        let number = match kind {
            NumberKind::I32 => value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Number::I32),
            NumberKind::I64 => value.as_i64().map(Number::I64),
            NumberKind::U64 => value.as_u64().map(Number::U64),
            NumberKind::F64 => value.as_f64().map(Number::F64),
        };
        number.ok_or_else(mismatch)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I32(v) => write!(f, "{}", v),
            Number::I64(v) => write!(f, "{}", v),
            Number::U64(v) => write!(f, "{}", v),
            Number::F64(v) => write!(f, "{}", v),
        }
    }
}

/// A Rust type that can travel as a typed payload or header value
///
/// The tag is written to the wire and must be unique within a registry.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use typedwire_core::Tagged;
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Order {
///     id: u64,
///     sku: String,
/// }
///
/// impl Tagged for Order {
///     const TYPE_TAG: &'static str = "shop.Order";
/// }
/// ```
pub trait Tagged:
    Serialize + DeserializeOwned + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Type tag written to the wire
    const TYPE_TAG: &'static str;

    /// JSON shape produced by `Serialize`
    const SHAPE: Shape = Shape::Object;
}

impl Tagged for bool {
    const TYPE_TAG: &'static str = "bool";
}

impl Tagged for serde_json::Value {
    const TYPE_TAG: &'static str = "json";
}

impl Tagged for Vec<String> {
    const TYPE_TAG: &'static str = "string[]";
    const SHAPE: Shape = Shape::Array;
}

impl Tagged for Vec<i32> {
    const TYPE_TAG: &'static str = "i32[]";
    const SHAPE: Shape = Shape::Array;
}

impl Tagged for Vec<i64> {
    const TYPE_TAG: &'static str = "i64[]";
    const SHAPE: Shape = Shape::Array;
}

impl Tagged for Vec<f64> {
    const TYPE_TAG: &'static str = "f64[]";
    const SHAPE: Shape = Shape::Array;
}

/// Object-safe view of a [`Tagged`] value
pub trait ErasedValue: fmt::Debug + Send + Sync {
    fn type_tag(&self) -> &'static str;

    fn shape(&self) -> Shape;

    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error>;

    fn as_any(&self) -> &dyn Any;

    fn value_type_id(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    fn eq_erased(&self, other: &dyn ErasedValue) -> bool;
}

impl<T: Tagged> ErasedValue for T {
    fn type_tag(&self) -> &'static str {
        T::TYPE_TAG
    }

    fn shape(&self) -> Shape {
        T::SHAPE
    }

    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn eq_erased(&self, other: &dyn ErasedValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Shared handle to a type-erased [`Tagged`] value
#[derive(Clone)]
pub struct TypedValue {
    inner: Arc<dyn ErasedValue>,
}

impl TypedValue {
    pub fn new<T: Tagged>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    pub fn type_tag(&self) -> &'static str {
        self.inner.type_tag()
    }

    pub fn shape(&self) -> Shape {
        self.inner.shape()
    }

    /// Render the value in its natural JSON form
    pub fn to_json(&self) -> MarshallingResult<serde_json::Value> {
        self.inner.to_json().map_err(Into::into)
    }

    /// [`TypeId`] of the wrapped Rust type
    pub fn value_type_id(&self) -> TypeId {
        self.inner.value_type_id()
    }

    /// Name of the wrapped Rust type
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Borrow the concrete value if it is a `T`
    pub fn downcast_ref<T: Tagged>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedValue")
            .field("tag", &self.type_tag())
            .field("value", &self.inner)
            .finish()
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_erased(other.inner.as_ref())
    }
}

/// A payload or header value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(Number),
    Typed(TypedValue),
}

impl Value {
    /// Wrap any [`Tagged`] value
    pub fn typed<T: Tagged>(value: T) -> Self {
        Value::Typed(TypedValue::new(value))
    }

    /// Type tag written to the wire for this value
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Text(_) => STRING_TAG,
            Value::Number(n) => n.type_tag(),
            Value::Typed(t) => t.type_tag(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Value::Text(_) => TypeKind::Text,
            Value::Number(n) => TypeKind::Number(n.kind()),
            Value::Typed(t) => t.shape().into(),
        }
    }

    /// True for values stored as native JSON scalars on the wire
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Text(_) | Value::Number(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Tagged>(&self) -> Option<&T> {
        match self {
            Value::Typed(t) => t.downcast_ref(),
            _ => None,
        }
    }

    /// Render the value in its natural JSON form
    pub fn to_json(&self) -> MarshallingResult<serde_json::Value> {
        match self {
            Value::Text(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Number(n) => n.to_json(),
            Value::Typed(t) => t.to_json(),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::I32(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::I64(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(Number::U64(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::F64(value))
    }
}

impl From<TypedValue> for Value {
    fn from(value: TypedValue) -> Self {
        Value::Typed(value)
    }
}
