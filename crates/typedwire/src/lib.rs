//! # typedwire
//!
//! Self-describing JSON encoding for messages made of a payload, named
//! headers, and a fixed set of well-known properties.
//!
//! Every encoded value carries a type tag, so a receiver holding the same
//! [`TypeRegistry`] rebuilds the original Rust types:
//! - Text and numbers travel as native JSON scalars
//! - Arrays and structured values are rebuilt through their [`Tagged`] type
//! - Input that is not a JSON object decodes as a plain-text payload
//!
//! ## Quick Start
//!
//! ```
//! use typedwire::prelude::*;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Order {
//!     id: u64,
//!     sku: String,
//! }
//!
//! impl Tagged for Order {
//!     const TYPE_TAG: &'static str = "shop.Order";
//! }
//!
//! let registry = TypeRegistry::new().with::<Order>()?;
//! let marshaller = JsonMessageMarshaller::with_registry(registry);
//!
//! let message = Message::builder(Value::typed(Order { id: 7, sku: "BOOK-42".into() }))
//!     .header("tenant", "acme")
//!     .priority(4)
//!     .build();
//!
//! let text = marshaller.encode(&message)?;
//! let decoded = marshaller.decode(&text)?;
//!
//! assert_eq!(decoded, message);
//! # Ok::<(), typedwire::MarshallingError>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`typedwire_core`] - Message model, typed values, config, and errors
//! - [`typedwire_transport`] - Marshaller, type registry, and codec
//! - [`typedwire_logging`] - Tracing subscriber setup

// Re-export core types
pub use typedwire_core::{
    DefaultMessageFactory, Headers, LogLevel, MarshallerConfig, MarshallingError,
    MarshallingResult, Message, MessageBuilder, MessageFactory, MessageProperties, MessageView,
    Number, NumberKind, Shape, Tagged, TypeKind, TypedValue, Value, WellKnownProperty,
};

// Re-export transport types
pub use typedwire_transport::{
    Codec, CodecError, JsonCodec, JsonMessageMarshaller, MessageMarshaller, TypeDescriptor,
    TypeRegistry,
};

// Re-export logging setup
pub use typedwire_logging::{ReloadHandle, init_logging, init_logging_from_config};

// Re-export common dependencies that message authors need
pub use serde;
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use typedwire::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        Headers, JsonMessageMarshaller, MarshallingError, MarshallingResult, Message,
        MessageMarshaller, MessageProperties, MessageView, Number, Tagged, TypeRegistry, Value,
    };

    // Serde derives (commonly needed for payload types)
    pub use serde::{Deserialize, Serialize};
}
