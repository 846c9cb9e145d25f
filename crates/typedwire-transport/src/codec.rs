//! Document codec used by the marshaller
//!
//! Every JSON document the marshaller writes or reads, including the nested
//! header entries, goes through one [`Codec`].

use once_cell::sync::OnceCell;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use thiserror::Error;
use typedwire_core::MarshallingError;

/// Failure to write or parse a document
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CodecError::Deserialization(err.to_string())
        } else {
            CodecError::Serialization(err.to_string())
        }
    }
}

impl From<CodecError> for MarshallingError {
    fn from(err: CodecError) -> Self {
        MarshallingError::codec(err)
    }
}

/// Trait for document encoding and decoding
///
/// The message marshaller only ever exchanges text, so the string methods
/// have default implementations on top of the byte-oriented ones.
pub trait Codec: Send + Sync {
    /// Write `value` as a document
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Parse a document into `T`
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;

    /// MIME type of the documents this codec writes
    fn content_type(&self) -> &'static str;

    /// Encode a value to a UTF-8 string
    fn encode_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        String::from_utf8(self.encode(value)?)
            .map_err(|err| CodecError::InvalidFormat(err.to_string()))
    }

    /// Decode a value from a string
    fn decode_str<T: DeserializeOwned>(&self, data: &str) -> Result<T, CodecError> {
        self.decode(data.as_bytes())
    }
}

/// Process-wide compact codec, created on first use
static SHARED_CODEC: OnceCell<Arc<JsonCodec>> = OnceCell::new();

/// serde_json-backed codec, compact unless built with [`JsonCodec::pretty`]
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact codec
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Codec writing indented, multi-line documents
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Process-wide compact codec
    ///
    /// Initialization runs at most once even under concurrent first use.
    pub fn shared() -> Arc<JsonCodec> {
        SHARED_CODEC.get_or_init(|| Arc::new(JsonCodec::new())).clone()
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        if self.pretty {
            serde_json::to_vec_pretty(value).map_err(Into::into)
        } else {
            serde_json::to_vec(value).map_err(Into::into)
        }
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(data).map_err(Into::into)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        if self.pretty {
            serde_json::to_string_pretty(value).map_err(Into::into)
        } else {
            serde_json::to_string(value).map_err(Into::into)
        }
    }

    fn decode_str<T: DeserializeOwned>(&self, data: &str) -> Result<T, CodecError> {
        serde_json::from_str(data).map_err(Into::into)
    }
}
