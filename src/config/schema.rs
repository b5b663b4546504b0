//! Configuration schema types
//!
//! This module defines the configuration structure for crsync.

use crate::config::settings::ClientRegistrySettings;
use crate::config::SecretString;
use crate::domain::constants::{CREATE_MESSAGE_DESTINATION, UPDATE_MESSAGE_DESTINATION};
use serde::{Deserialize, Serialize};

/// Main crsync configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrSyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Source system (record source) connection
    pub source: SourceConfig,

    /// Client registry connection
    pub registry: RegistryConfig,

    /// Identifier minting and extension mapping settings
    pub client_registry: ClientRegistryConfig,

    /// Message destinations
    #[serde(default)]
    pub messaging: MessagingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CrSyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.registry.validate()?;
        self.client_registry.validate()?;
        self.messaging.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (log representations instead of sending them to the registry)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Source system configuration
///
/// The credentials are those of the system account every message is processed
/// as, whatever identity the bus delivered the message under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the source system (e.g. `https://emr.example.org/openmrs`)
    pub base_url: String,

    /// System account username
    pub username: String,

    /// System account password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        validate_http_url("source.base_url", &self.base_url)?;

        if self.username.trim().is_empty() {
            return Err("source.username cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("source.password cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Client registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// FHIR base URL of the client registry (e.g. `https://cr.example.org/fhir`)
    pub base_url: String,

    /// Username for basic authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic authentication (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl RegistryConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("registry.base_url", &self.base_url)?;

        if self.username.is_some() != self.password.is_some() {
            return Err(
                "registry.username and registry.password must be set together".to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("registry.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Identifier minting and extension mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRegistryConfig {
    /// Root of every minted identifier value (`<root>/<patient uuid>`)
    pub identifier_root: String,

    /// Comma-separated `attributeTypeUuid|extensionUrl` pairs
    #[serde(default)]
    pub extension_uuid_extension_urls: String,
}

impl ClientRegistryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.identifier_root.trim().is_empty() {
            return Err("client_registry.identifier_root cannot be empty".to_string());
        }
        Ok(())
    }

    /// Parses the mapping string once into settings for the pipeline
    pub fn settings(&self) -> ClientRegistrySettings {
        ClientRegistrySettings::new(
            self.identifier_root.clone(),
            &self.extension_uuid_extension_urls,
        )
    }
}

/// Message destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Destination that carries patient updates
    #[serde(default = "default_update_destination")]
    pub update_destination: String,

    /// Destination that carries patient creations; any destination other than
    /// the update destination is treated as a create
    #[serde(default = "default_create_destination")]
    pub create_destination: String,
}

impl MessagingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.update_destination.trim().is_empty() {
            return Err("messaging.update_destination cannot be empty".to_string());
        }
        if self.update_destination == self.create_destination {
            return Err(
                "messaging.update_destination and messaging.create_destination must differ"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            update_destination: default_update_destination(),
            create_destination: default_create_destination(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(format!("{field} must start with http:// or https://"));
    }
    url::Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_update_destination() -> String {
    UPDATE_MESSAGE_DESTINATION.to_string()
}

fn default_create_destination() -> String {
    CREATE_MESSAGE_DESTINATION.to_string()
}

fn default_local_path() -> String {
    "/var/log/crsync".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
