//! Message model and the collaborator traits the codec reads from and writes to

use crate::error::MarshallingResult;
use crate::properties::MessageProperties;
use crate::value::Value;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Header key for the system-assigned message identity
pub const ID_HEADER: &str = "id";

/// Header key for the system-assigned creation timestamp
pub const TIMESTAMP_HEADER: &str = "timestamp";

/// Header keys that are assigned by the message itself and never carried
pub const RESERVED_HEADERS: [&str; 2] = [ID_HEADER, TIMESTAMP_HEADER];

/// Returns true if `key` is assigned by the message rather than the sender
pub fn is_reserved_header(key: &str) -> bool {
    RESERVED_HEADERS.contains(&key)
}

/// Header mapping, ordered by key so encoded output is deterministic
pub type Headers = BTreeMap<String, Value>;

/// Read access to an outgoing message
///
/// `headers()` may contain the reserved keys; the encoder drops them.
pub trait MessageView {
    fn payload(&self) -> &Value;

    fn headers(&self) -> &Headers;

    fn properties(&self) -> &MessageProperties;
}

/// Builds the final message value from decoded parts
pub trait MessageFactory {
    type Output;

    fn create(
        &self,
        payload: Value,
        headers: Headers,
        properties: MessageProperties,
    ) -> MarshallingResult<Self::Output>;
}

/// Factory producing [`Message`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessageFactory;

impl MessageFactory for DefaultMessageFactory {
    type Output = Message;

    fn create(
        &self,
        payload: Value,
        headers: Headers,
        properties: MessageProperties,
    ) -> MarshallingResult<Message> {
        Ok(Message::new(payload, headers, properties))
    }
}

/// An immutable message: payload, headers, and well-known properties
///
/// Every message gets a fresh identity and timestamp on construction.
/// Equality ignores both, so a decoded message equals its original.
#[derive(Debug, Clone)]
pub struct Message {
    id: Uuid,
    timestamp: u64,
    payload: Value,
    headers: Headers,
    properties: MessageProperties,
}

impl Message {
    /// Create a message, dropping any reserved keys from `headers`
    pub fn new(payload: impl Into<Value>, mut headers: Headers, properties: MessageProperties) -> Self {
        headers.retain(|key, _| !is_reserved_header(key));
        Self {
            id: Uuid::new_v4(),
            timestamp: now_millis(),
            payload: payload.into(),
            headers,
            properties,
        }
    }

    /// Create a message with no headers or properties
    pub fn with_payload(payload: impl Into<Value>) -> Self {
        Self::new(payload, Headers::new(), MessageProperties::default())
    }

    pub fn builder(payload: impl Into<Value>) -> MessageBuilder {
        MessageBuilder::new(payload)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&Value> {
        self.headers.get(key)
    }

    pub fn properties(&self) -> &MessageProperties {
        &self.properties
    }

    /// Decompose into payload, headers, and properties
    pub fn into_parts(self) -> (Value, Headers, MessageProperties) {
        (self.payload, self.headers, self.properties)
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
            && self.headers == other.headers
            && self.properties == other.properties
    }
}

impl MessageView for Message {
    fn payload(&self) -> &Value {
        &self.payload
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn properties(&self) -> &MessageProperties {
        &self.properties
    }
}

/// Builder for assembling a [`Message`]
#[derive(Debug)]
pub struct MessageBuilder {
    payload: Value,
    headers: Headers,
    properties: MessageProperties,
}

impl MessageBuilder {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
            headers: Headers::new(),
            properties: MessageProperties::default(),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: MessageProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.properties.correlation_id = Some(id.into());
        self
    }

    pub fn expiration_date(mut self, millis: i64) -> Self {
        self.properties.expiration_date = Some(millis);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.properties.priority = Some(priority);
        self
    }

    pub fn sequence_number(mut self, number: i32) -> Self {
        self.properties.sequence_number = Some(number);
        self
    }

    pub fn sequence_size(mut self, size: i32) -> Self {
        self.properties.sequence_size = Some(size);
        self
    }

    pub fn build(self) -> Message {
        Message::new(self.payload, self.headers, self.properties)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(saturating_millis)
        .unwrap_or_default()
}

fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
