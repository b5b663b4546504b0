//! Domain error types
//!
//! This module defines the error hierarchy for crsync. Errors are domain-specific
//! and don't expose third-party HTTP client types.

use thiserror::Error;

/// Main crsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CrSyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record source errors
    #[error("Record source error: {0}")]
    Source(#[from] SourceError),

    /// Client registry errors
    #[error("Client registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Inbound message errors
    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    /// Execution context could not be started
    #[error("Execution context error: {0}")]
    Context(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Record source errors
///
/// Errors that occur when loading a patient or its attributes from the source
/// system.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to reach the source system
    #[error("Failed to connect to record source: {0}")]
    ConnectionFailed(String),

    /// No patient exists for the uuid
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// The source refused the system credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The source answered with something that is not a patient or attribute list
    #[error("Invalid response from record source: {0}")]
    InvalidResponse(String),

    /// Any other non-success status
    #[error("Record source error: {status} - {message}")]
    Status { status: u16, message: String },
}

/// Underlying cause of a registry connection error
#[derive(Debug, Error)]
pub enum ConnectionCause {
    /// The registry answered in a format the client could not understand
    #[error("data format not understood: {0}")]
    DataFormat(String),

    /// The request never completed (DNS, TLS, refused connection, timeout)
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Client registry errors
///
/// Connection-level failures keep their underlying cause so callers can tell a
/// format rejection apart from a network failure.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Connection-level failure with its classified cause
    #[error("Failed to communicate with client registry: {message}")]
    Connection {
        message: String,
        #[source]
        cause: ConnectionCause,
    },

    /// The registry answered with a non-success status
    #[error("Client registry rejected request: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// The representation could not be encoded for sending
    #[error("Failed to encode resource: {0}")]
    Encoding(String),

    /// The representation has no id to address an update with
    #[error("Resource has no id: {0}")]
    MissingId(String),
}

impl RegistryError {
    /// Builds a connection error caused by a response the client could not parse
    pub fn data_format(message: impl Into<String>, detail: impl Into<String>) -> Self {
        RegistryError::Connection {
            message: message.into(),
            cause: ConnectionCause::DataFormat(detail.into()),
        }
    }

    /// Builds a connection error caused by a transport failure
    pub fn transport(message: impl Into<String>, detail: impl Into<String>) -> Self {
        RegistryError::Connection {
            message: message.into(),
            cause: ConnectionCause::Transport(detail.into()),
        }
    }

    /// Returns true for a connection error whose cause is a data format error
    pub fn is_data_format_rejection(&self) -> bool {
        matches!(
            self,
            RegistryError::Connection {
                cause: ConnectionCause::DataFormat(_),
                ..
            }
        )
    }
}

/// Inbound message errors
#[derive(Debug, Error)]
pub enum MessageError {
    /// A property exists but cannot be read as a string
    #[error("Property '{name}' cannot be read as a string: {reason}")]
    PropertyFormat { name: String, reason: String },

    /// A raw line from the bus could not be decoded into a message
    #[error("Malformed message: {0}")]
    Malformed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CrSyncError {
    fn from(err: std::io::Error) -> Self {
        CrSyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CrSyncError {
    fn from(err: serde_json::Error) -> Self {
        CrSyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CrSyncError {
    fn from(err: toml::de::Error) -> Self {
        CrSyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
