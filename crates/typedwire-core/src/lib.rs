//! typedwire-core - Message model, typed values, and error types
//!
//! This crate provides the foundational types shared by the typedwire codec:
//! - [`Message`] and [`MessageBuilder`] for assembling messages
//! - [`Value`], [`Number`], and [`TypedValue`] for type-tagged payloads and headers
//! - [`Tagged`] for registering application types with the codec
//! - [`MessageProperties`] for the five well-known envelope properties
//! - [`MessageView`] and [`MessageFactory`] collaborator traits
//! - [`MarshallingError`] for error handling
//! - [`MarshallerConfig`] for marshaller configuration

mod config;
mod error;
mod message;
mod properties;
mod value;

pub use config::MarshallerConfig;
pub use error::{BoxError, MarshallingError, MarshallingResult, json_kind};
pub use message::{
    DefaultMessageFactory, Headers, ID_HEADER, Message, MessageBuilder, MessageFactory,
    MessageView, RESERVED_HEADERS, TIMESTAMP_HEADER, is_reserved_header,
};
pub use properties::{MessageProperties, WellKnownProperty};
pub use value::{
    ErasedValue, Number, NumberKind, STRING_TAG, Shape, Tagged, TypeKind, TypedValue, Value,
};

/// Log levels understood by the logging setup
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DefaultMessageFactory, Headers, LogLevel, MarshallerConfig, MarshallingError,
        MarshallingResult, Message, MessageBuilder, MessageFactory, MessageProperties,
        MessageView, Number, Tagged, TypedValue, Value, WellKnownProperty,
    };
}
