//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - JSON-formatted local file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use crsync::logging::init_logging;
//! use crsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Listener started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an inbound message as received from the bus
///
/// # Example
///
/// ```no_run
/// use crsync::log_message_received;
/// use crsync::domain::InboundMessage;
///
/// let message = InboundMessage::from_json_line(r#"{"type":"text","destination":"d","body":"x"}"#).unwrap();
/// log_message_received!(&message);
/// ```
#[macro_export]
macro_rules! log_message_received {
    ($message:expr) => {
        tracing::trace!(
            destination = $message.destination(),
            message = %$message,
            "Received message"
        );
    };
}

/// Log the end of a successful patient sync
///
/// # Example
///
/// ```no_run
/// use crsync::log_sync_complete;
/// use crsync::core::dispatch::Delivery;
/// use crsync::domain::{Intent, PatientUuid};
///
/// let patient = PatientUuid::new("5946f880-b197-400b-9caa-a3c661d23041").unwrap();
/// log_sync_complete!(&patient, Intent::Create, Delivery::Delivered);
/// ```
#[macro_export]
macro_rules! log_sync_complete {
    ($patient:expr, $intent:expr, $delivery:expr) => {
        tracing::info!(
            patient = %$patient,
            intent = %$intent,
            delivery = ?$delivery,
            "Patient synced to client registry"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use crsync::log_error_with_context;
/// use crsync::domain::CrSyncError;
///
/// let error = CrSyncError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
