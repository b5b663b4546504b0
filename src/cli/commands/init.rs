//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

const COMMENTED_CONFIG: &str = include_str!("../../../crsync.example.toml");

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "crsync.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            COMMENTED_CONFIG
        } else {
            Self::minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set CRSYNC_SOURCE_USERNAME and CRSYNC_SOURCE_PASSWORD (or use a .env file)");
                println!("  3. Validate configuration: crsync validate-config");
                println!("  4. Start syncing: crsync listen");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    fn minimal_config() -> &'static str {
        r#"# crsync Configuration File

[application]
log_level = "info"
dry_run = false

[source]
base_url = "https://emr.example.org/openmrs"
username = "${CRSYNC_SOURCE_USERNAME}"
password = "${CRSYNC_SOURCE_PASSWORD}"

[registry]
base_url = "https://cr.example.org/fhir"

[client_registry]
identifier_root = "http://clientregistry.org/openmrs"
extension_uuid_extension_urls = ""

[logging]
local_enabled = false
"#
    }
}
