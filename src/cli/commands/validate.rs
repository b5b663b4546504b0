//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let settings = config.client_registry.settings();

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Source System: {}", config.source.base_url);
        println!("  Source Account: {}", config.source.username);
        println!("  Client Registry: {}", config.registry.base_url);
        println!(
            "  Registry Auth: {}",
            if config.registry.username.is_some() {
                "basic"
            } else {
                "none"
            }
        );
        println!("  Identifier Root: {}", settings.identifier_root());
        println!("  Extension Mappings: {}", settings.extension_rules().len());
        for rule in settings.extension_rules() {
            println!("    {} -> {}", rule.attribute_type, rule.extension_url);
        }
        println!("  Update Destination: {}", config.messaging.update_destination);
        println!("  Create Destination: {}", config.messaging.create_destination);
        println!();
        Ok(0)
    }
}
