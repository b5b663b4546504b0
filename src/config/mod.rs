//! Configuration management for crsync.
//!
//! crsync reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CRSYNC_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry run
//! - [`SourceConfig`] - source system URL and system account
//! - [`RegistryConfig`] - client registry URL and credentials
//! - [`ClientRegistryConfig`] - identifier root and extension mapping
//! - [`MessagingConfig`] - update/create destinations
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! base_url = "https://emr.example.org/openmrs"
//! username = "daemon"
//! password = "${CRSYNC_SOURCE_PASSWORD}"
//!
//! [registry]
//! base_url = "https://cr.example.org/fhir"
//!
//! [client_registry]
//! identifier_root = "http://clientregistry.org/openmrs"
//! extension_uuid_extension_urls = "8d8718c2-c2cc-11de-8d13-0010c6dffd0f|http://example.org/fhir/StructureDefinition/birthplace"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;
pub mod settings;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ClientRegistryConfig, CrSyncConfig, LoggingConfig, MessagingConfig,
    RegistryConfig, SourceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
pub use settings::ClientRegistrySettings;
