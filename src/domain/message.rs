//! Inbound message and notification types
//!
//! The bus delivers several message shapes. Only [`MapMessage`] offers named
//! key/value access, and only map messages can become a [`Notification`].

use super::errors::MessageError;
use super::ids::PatientUuid;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// What the registry should do with a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intent {
    /// First contact with the registry
    Create,
    /// The patient is assumed to exist in the registry already
    Update,
}

impl Intent {
    /// Classifies a destination: the update destination means update, anything else create
    pub fn from_destination(destination: &str, update_destination: &str) -> Self {
        if destination == update_destination {
            Intent::Update
        } else {
            Intent::Create
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Create => write!(f, "create"),
            Intent::Update => write!(f, "update"),
        }
    }
}

/// A message with named properties, delivered on a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMessage {
    destination: String,
    #[serde(default)]
    body: Map<String, Value>,
}

impl MapMessage {
    /// Creates a map message
    pub fn new(destination: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            destination: destination.into(),
            body,
        }
    }

    /// Adds or replaces a property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    /// Destination the message arrived on
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Reads a property as a string
    ///
    /// Scalars are converted to their textual form; a missing or null property
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::PropertyFormat`] if the property is an array or object.
    pub fn get_string(&self, name: &str) -> Result<Option<String>, MessageError> {
        match self.body.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(MessageError::PropertyFormat {
                name: name.to_string(),
                reason: format!("unsupported value {other}"),
            }),
        }
    }
}

/// Any message the bus can deliver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundMessage {
    /// Named key/value properties
    Map(MapMessage),
    /// Opaque text payload
    Text { destination: String, body: String },
    /// Opaque binary payload
    Bytes { destination: String, body: Vec<u8> },
}

impl InboundMessage {
    /// Decodes one newline-delimited JSON message
    pub fn from_json_line(line: &str) -> Result<Self, MessageError> {
        serde_json::from_str(line).map_err(|e| MessageError::Malformed(e.to_string()))
    }

    /// Destination the message arrived on
    pub fn destination(&self) -> &str {
        match self {
            InboundMessage::Map(m) => m.destination(),
            InboundMessage::Text { destination, .. } => destination,
            InboundMessage::Bytes { destination, .. } => destination,
        }
    }

    /// Returns the map view of the message if it has one
    pub fn as_map(&self) -> Option<&MapMessage> {
        match self {
            InboundMessage::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for InboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

/// A patient change notification extracted from a map message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub patient: PatientUuid,
    pub intent: Intent,
}
