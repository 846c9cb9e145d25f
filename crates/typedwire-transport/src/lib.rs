//! typedwire-transport - type-tagged JSON message marshaller
//!
//! This crate provides:
//! - [`JsonMessageMarshaller`] for encoding messages to self-describing JSON
//! - [`TypeRegistry`] mapping wire type tags back to Rust types
//! - [`Codec`] trait and the [`JsonCodec`] implementation used underneath
//! - [`WireEnvelope`] describing the document layout

mod codec;
mod envelope;
mod marshaller;
mod registry;

pub use codec::{Codec, CodecError, JsonCodec};
pub use envelope::{
    HEADERS_KEY, HeaderEntry, PAYLOAD_CLAZZ_KEY, PAYLOAD_KEY, PROPERTIES_KEY, WireEnvelope,
    decode_properties, encode_properties,
};
pub use marshaller::{JsonMessageMarshaller, MessageMarshaller};
pub use registry::{TypeDescriptor, TypeRegistry};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Codec, CodecError, JsonCodec, JsonMessageMarshaller, MessageMarshaller, TypeRegistry,
    };
}
