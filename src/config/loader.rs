//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CrSyncConfig;
use super::secret::secret_string;
use crate::domain::errors::CrSyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CrSyncConfig
/// 4. Applies environment variable overrides (CRSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use crsync::config::loader::load_config;
///
/// let config = load_config("crsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CrSyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CrSyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CrSyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn parse_config(contents: &str) -> Result<CrSyncConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CrSyncConfig = toml::from_str(&contents)
        .map_err(|e| CrSyncError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CrSyncError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left alone.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CrSyncError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(CrSyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using CRSYNC_* prefix
///
/// Environment variables follow the pattern: CRSYNC_<SECTION>_<KEY>
/// For example: CRSYNC_REGISTRY_BASE_URL, CRSYNC_CLIENT_REGISTRY_IDENTIFIER_ROOT
fn apply_env_overrides(config: &mut CrSyncConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CRSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("CRSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Source overrides
    if let Ok(val) = std::env::var("CRSYNC_SOURCE_BASE_URL") {
        config.source.base_url = val;
    }
    if let Ok(val) = std::env::var("CRSYNC_SOURCE_USERNAME") {
        config.source.username = val;
    }
    if let Ok(val) = std::env::var("CRSYNC_SOURCE_PASSWORD") {
        config.source.password = secret_string(val);
    }

    // Registry overrides
    if let Ok(val) = std::env::var("CRSYNC_REGISTRY_BASE_URL") {
        config.registry.base_url = val;
    }
    if let Ok(val) = std::env::var("CRSYNC_REGISTRY_USERNAME") {
        config.registry.username = Some(val);
    }
    if let Ok(val) = std::env::var("CRSYNC_REGISTRY_PASSWORD") {
        config.registry.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("CRSYNC_REGISTRY_TLS_VERIFY") {
        config.registry.tls_verify = val.parse().unwrap_or(true);
    }

    // Client registry overrides
    if let Ok(val) = std::env::var("CRSYNC_CLIENT_REGISTRY_IDENTIFIER_ROOT") {
        config.client_registry.identifier_root = val;
    }
    if let Ok(val) = std::env::var("CRSYNC_CLIENT_REGISTRY_EXTENSION_UUID_EXTENSION_URLS") {
        config.client_registry.extension_uuid_extension_urls = val;
    }

    // Messaging overrides
    if let Ok(val) = std::env::var("CRSYNC_MESSAGING_UPDATE_DESTINATION") {
        config.messaging.update_destination = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CRSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CRSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
