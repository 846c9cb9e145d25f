//! Wire envelope and header entry types
//!
//! The envelope is the top-level JSON object of an encoded message:
//!
//! ```text
//! {
//!   "payload": <native JSON value>,
//!   "payloadClazz": "<type tag>",
//!   "headers": { "<name>": "<JSON text of a HeaderEntry>", ... },
//!   "properties": { "<name>": "<string>", ... }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::ParseIntError;
use std::str::FromStr;
use typedwire_core::{MarshallingError, MarshallingResult, MessageProperties, WellKnownProperty};

pub const PAYLOAD_KEY: &str = "payload";
pub const PAYLOAD_CLAZZ_KEY: &str = "payloadClazz";
pub const HEADERS_KEY: &str = "headers";
pub const PROPERTIES_KEY: &str = "properties";

/// Top-level encoded document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEnvelope {
    /// Payload in its natural JSON form
    pub payload: serde_json::Value,

    /// Type tag of the payload
    pub payload_clazz: String,

    /// Header name to JSON text of a [`HeaderEntry`]
    pub headers: BTreeMap<String, String>,

    /// Well-known property name to its string rendering
    pub properties: BTreeMap<String, String>,
}

impl WireEnvelope {
    /// Extract an envelope from a parsed JSON object
    ///
    /// All four members are required. `payloadClazz` is checked first so a
    /// document without a type tag is reported as such.
    pub fn from_object(
        mut object: serde_json::Map<String, serde_json::Value>,
    ) -> MarshallingResult<Self> {
        let payload_clazz = match object.remove(PAYLOAD_CLAZZ_KEY) {
            Some(serde_json::Value::String(tag)) => tag,
            Some(other) => {
                return Err(MarshallingError::mismatch(
                    PAYLOAD_CLAZZ_KEY,
                    "string",
                    &other,
                ));
            }
            None => return Err(MarshallingError::MissingField(PAYLOAD_CLAZZ_KEY)),
        };
        let payload = object
            .remove(PAYLOAD_KEY)
            .ok_or(MarshallingError::MissingField(PAYLOAD_KEY))?;
        let properties = string_map(object.remove(PROPERTIES_KEY), PROPERTIES_KEY)?;
        let headers = string_map(object.remove(HEADERS_KEY), HEADERS_KEY)?;

        Ok(Self {
            payload,
            payload_clazz,
            headers,
            properties,
        })
    }
}

fn string_map(
    value: Option<serde_json::Value>,
    field: &'static str,
) -> MarshallingResult<BTreeMap<String, String>> {
    match value {
        Some(serde_json::Value::Object(map)) => map
            .into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(text) => Ok((key, text)),
                other => Err(MarshallingError::mismatch(field, "string", &other)),
            })
            .collect(),
        Some(other) => Err(MarshallingError::mismatch(field, "object", &other)),
        None => Err(MarshallingError::MissingField(field)),
    }
}

/// A single header value with its type tag
///
/// `value` is a native JSON scalar for strings and numbers, and JSON text
/// (a string holding a serialized document) for every other type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub clazz: String,
    pub value: serde_json::Value,
}

/// Render the set properties as strings keyed by wire name
pub fn encode_properties(properties: &MessageProperties) -> BTreeMap<String, String> {
    WellKnownProperty::ALL
        .into_iter()
        .filter_map(|property| {
            properties
                .get(property)
                .map(|value| (property.as_str().to_string(), value))
        })
        .collect()
}

/// Parse well-known properties from their string renderings
///
/// Names that are not well-known properties are ignored.
pub fn decode_properties(raw: &BTreeMap<String, String>) -> MarshallingResult<MessageProperties> {
    let mut properties = MessageProperties::default();
    for property in WellKnownProperty::ALL {
        let Some(text) = raw.get(property.as_str()) else {
            continue;
        };
        match property {
            WellKnownProperty::CorrelationId => properties.correlation_id = Some(text.clone()),
            WellKnownProperty::ExpirationDate => {
                properties.expiration_date = Some(parse_property(property, text)?)
            }
            WellKnownProperty::Priority => {
                properties.priority = Some(parse_property(property, text)?)
            }
            WellKnownProperty::SequenceNumber => {
                properties.sequence_number = Some(parse_property(property, text)?)
            }
            WellKnownProperty::SequenceSize => {
                properties.sequence_size = Some(parse_property(property, text)?)
            }
        }
    }
    Ok(properties)
}

fn parse_property<T>(property: WellKnownProperty, text: &str) -> MarshallingResult<T>
where
    T: FromStr<Err = ParseIntError>,
{
    text.parse()
        .map_err(|source| MarshallingError::InvalidProperty {
            name: property.as_str(),
            value: text.to_string(),
            source,
        })
}
