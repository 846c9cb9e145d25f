//! Type-tagged JSON message marshaller
//!
//! Encoding writes a [`WireEnvelope`]: the payload in its natural JSON form
//! with its type tag, each header as JSON text of a [`HeaderEntry`], and the
//! set well-known properties as strings.
//!
//! Decoding reverses this through the [`TypeRegistry`]. Input that is not a
//! JSON object is taken as a plain-text payload.

use crate::codec::{Codec, JsonCodec};
use crate::envelope::{HeaderEntry, WireEnvelope, decode_properties, encode_properties};
use crate::registry::TypeRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};
use typedwire_core::{
    DefaultMessageFactory, Headers, MarshallerConfig, MarshallingError, MarshallingResult,
    Message, MessageFactory, MessageProperties, MessageView, TypeKind, Value, is_reserved_header,
    json_kind,
};

/// Object-safe marshaller interface for transports
pub trait MessageMarshaller: Send + Sync {
    /// Encode a message to text
    fn marshal(&self, message: &dyn MessageView) -> MarshallingResult<String>;

    /// Decode text to a message
    fn unmarshal(&self, text: &str) -> MarshallingResult<Message>;
}

/// Marshaller writing self-describing JSON documents
///
/// Safe to share between threads; every call is independent.
pub struct JsonMessageMarshaller<C: Codec = JsonCodec> {
    codec: Arc<C>,
    registry: Arc<TypeRegistry>,
}

impl JsonMessageMarshaller<JsonCodec> {
    /// Marshaller using the shared codec and the built-in types
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::new())
    }

    /// Marshaller using the shared codec and the given registry
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self::with_codec(JsonCodec::shared(), registry)
    }

    /// Marshaller configured from a [`MarshallerConfig`]
    pub fn from_config(config: &MarshallerConfig, registry: TypeRegistry) -> Self {
        let codec = if config.pretty {
            Arc::new(JsonCodec::pretty())
        } else {
            JsonCodec::shared()
        };
        Self::with_codec(codec, registry)
    }
}

impl Default for JsonMessageMarshaller<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> Clone for JsonMessageMarshaller<C> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<C: Codec> JsonMessageMarshaller<C> {
    /// Marshaller using a custom codec
    pub fn with_codec(codec: Arc<C>, registry: TypeRegistry) -> Self {
        Self {
            codec,
            registry: Arc::new(registry),
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Encode a message to JSON text
    ///
    /// Reserved headers are dropped. Every value's tag must be registered
    /// so that the output can be decoded again.
    pub fn encode<M: MessageView + ?Sized>(&self, message: &M) -> MarshallingResult<String> {
        let properties = encode_properties(message.properties());

        let mut headers = BTreeMap::new();
        let mut dropped = 0usize;
        for (key, value) in message.headers() {
            if is_reserved_header(key) {
                dropped += 1;
                continue;
            }
            let entry = self.header_entry(value)?;
            headers.insert(key.clone(), self.codec.encode_string(&entry)?);
        }
        if dropped > 0 {
            debug!(dropped, "dropped reserved headers");
        }

        let payload = message.payload();
        self.registry.check(payload)?;
        let envelope = WireEnvelope {
            payload: payload.to_json()?,
            payload_clazz: payload.type_tag().to_string(),
            headers,
            properties,
        };

        let text = self.codec.encode_string(&envelope)?;
        trace!(
            payload_clazz = %envelope.payload_clazz,
            headers = envelope.headers.len(),
            properties = envelope.properties.len(),
            "encoded message"
        );
        Ok(text)
    }

    /// Decode JSON text to a [`Message`]
    pub fn decode(&self, text: &str) -> MarshallingResult<Message> {
        self.decode_with(text, &DefaultMessageFactory)
    }

    /// Decode JSON text and hand the parts to `factory`
    pub fn decode_with<F: MessageFactory>(
        &self,
        text: &str,
        factory: &F,
    ) -> MarshallingResult<F::Output> {
        let object = match self
            .codec
            .decode_str::<serde_json::Map<String, serde_json::Value>>(text)
        {
            Ok(object) => object,
            Err(err) => {
                debug!(error = %err, "input is not a JSON object, decoding as plain text");
                return factory.create(
                    Value::Text(text.to_string()),
                    Headers::new(),
                    MessageProperties::default(),
                );
            }
        };

        let envelope = WireEnvelope::from_object(object)?;
        let descriptor = self.registry.resolve(&envelope.payload_clazz)?;
        let payload = descriptor.decode(envelope.payload)?;
        let properties = decode_properties(&envelope.properties)?;
        let headers = self.decode_headers(envelope.headers)?;

        trace!(
            payload_clazz = %envelope.payload_clazz,
            headers = headers.len(),
            properties = properties.len(),
            "decoded message"
        );
        factory.create(payload, headers, properties)
    }

    fn header_entry(&self, value: &Value) -> MarshallingResult<HeaderEntry> {
        self.registry.check(value)?;
        let raw = match value {
            Value::Text(_) | Value::Number(_) => value.to_json()?,
            Value::Typed(typed) => {
                serde_json::Value::String(self.codec.encode_string(&typed.to_json()?)?)
            }
        };
        Ok(HeaderEntry {
            clazz: value.type_tag().to_string(),
            value: raw,
        })
    }

    fn decode_headers(&self, raw: BTreeMap<String, String>) -> MarshallingResult<Headers> {
        let mut headers = Headers::new();
        for (key, text) in raw {
            if is_reserved_header(&key) {
                continue;
            }
            let entry: HeaderEntry =
                self.codec
                    .decode_str(&text)
                    .map_err(|err| MarshallingError::MalformedHeader {
                        key: key.clone(),
                        reason: err.to_string(),
                    })?;
            let descriptor = self.registry.resolve(&entry.clazz)?;
            let value = match descriptor.kind() {
                TypeKind::Text | TypeKind::Number(_) => descriptor.decode(entry.value)?,
                TypeKind::Array | TypeKind::Object => {
                    let blob = match entry.value {
                        serde_json::Value::String(blob) => blob,
                        other => {
                            return Err(MarshallingError::MalformedHeader {
                                reason: format!(
                                    "expected JSON text for '{}', found {}",
                                    entry.clazz,
                                    json_kind(&other)
                                ),
                                key,
                            });
                        }
                    };
                    let json: serde_json::Value = self.codec.decode_str(&blob).map_err(|err| {
                        MarshallingError::MalformedHeader {
                            key: key.clone(),
                            reason: err.to_string(),
                        }
                    })?;
                    descriptor.decode(json)?
                }
            };
            headers.insert(key, value);
        }
        Ok(headers)
    }
}

impl<C: Codec> MessageMarshaller for JsonMessageMarshaller<C> {
    fn marshal(&self, message: &dyn MessageView) -> MarshallingResult<String> {
        self.encode(message)
    }

    fn unmarshal(&self, text: &str) -> MarshallingResult<Message> {
        self.decode(text)
    }
}

impl<C: Codec> std::fmt::Debug for JsonMessageMarshaller<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonMessageMarshaller")
            .field("content_type", &self.codec.content_type())
            .field("types", &self.registry.len())
            .finish()
    }
}
