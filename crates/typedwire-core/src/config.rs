//! Marshaller configuration types

use crate::LogLevel;
use serde::{Deserialize, Serialize};

/// Configuration for a message marshaller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshallerConfig {
    /// Pretty-print encoded documents (default: false for compact wire text)
    #[serde(default)]
    pub pretty: bool,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MarshallerConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            log_level: default_log_level(),
        }
    }
}

impl MarshallerConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Enable pretty-printed output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Parsed log level, falling back to `Info` for unrecognized names
    pub fn log_level(&self) -> LogLevel {
        self.log_level.parse().unwrap_or(LogLevel::Info)
    }
}


#[cfg(test)]
#[path = "config/config_parameterized_tests.rs"]
mod config_parameterized_tests;
