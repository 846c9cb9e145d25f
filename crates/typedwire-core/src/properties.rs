//! Well-known envelope properties

use serde::{Deserialize, Serialize};

/// The five well-known properties a message may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownProperty {
    CorrelationId,
    ExpirationDate,
    Priority,
    SequenceNumber,
    SequenceSize,
}

impl WellKnownProperty {
    pub const ALL: [WellKnownProperty; 5] = [
        WellKnownProperty::CorrelationId,
        WellKnownProperty::ExpirationDate,
        WellKnownProperty::Priority,
        WellKnownProperty::SequenceNumber,
        WellKnownProperty::SequenceSize,
    ];

    /// Property name used on the wire (stable API)
    pub fn as_str(self) -> &'static str {
        match self {
            WellKnownProperty::CorrelationId => "CorrelationId",
            WellKnownProperty::ExpirationDate => "ExpirationDate",
            WellKnownProperty::Priority => "Priority",
            WellKnownProperty::SequenceNumber => "SequenceNumber",
            WellKnownProperty::SequenceSize => "SequenceSize",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        WellKnownProperty::ALL
            .into_iter()
            .find(|property| property.as_str() == name)
    }
}

impl std::fmt::Display for WellKnownProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known properties attached to a message
///
/// Every property is independent and optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageProperties {
    /// Correlation identifier, carried as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    /// Expiration timestamp (milliseconds since the Unix epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_size: Option<i32>,
}

impl MessageProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_expiration_date(mut self, millis: i64) -> Self {
        self.expiration_date = Some(millis);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_sequence_number(mut self, number: i32) -> Self {
        self.sequence_number = Some(number);
        self
    }

    pub fn with_sequence_size(mut self, size: i32) -> Self {
        self.sequence_size = Some(size);
        self
    }

    /// Text rendering of a property, or `None` if it is not set
    pub fn get(&self, property: WellKnownProperty) -> Option<String> {
        match property {
            WellKnownProperty::CorrelationId => self.correlation_id.clone(),
            WellKnownProperty::ExpirationDate => self.expiration_date.map(|v| v.to_string()),
            WellKnownProperty::Priority => self.priority.map(|v| v.to_string()),
            WellKnownProperty::SequenceNumber => self.sequence_number.map(|v| v.to_string()),
            WellKnownProperty::SequenceSize => self.sequence_size.map(|v| v.to_string()),
        }
    }

    /// Number of properties that are set
    pub fn len(&self) -> usize {
        WellKnownProperty::ALL
            .into_iter()
            .filter(|p| self.is_set(*p))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_set(&self, property: WellKnownProperty) -> bool {
        match property {
            WellKnownProperty::CorrelationId => self.correlation_id.is_some(),
            WellKnownProperty::ExpirationDate => self.expiration_date.is_some(),
            WellKnownProperty::Priority => self.priority.is_some(),
            WellKnownProperty::SequenceNumber => self.sequence_number.is_some(),
            WellKnownProperty::SequenceSize => self.sequence_size.is_some(),
        }
    }
}
