//! Sync command implementation
//!
//! Pushes one patient through the same pipeline the listener uses, without
//! going through a message.

use crate::cli::commands::build_pipeline;
use crate::config::load_config;
use crate::core::context::{ExecutionContext, SystemPrincipal, SystemToken};
use crate::core::dispatch::Delivery;
use crate::domain::{Intent, Notification, PatientUuid};
use clap::Args;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Uuid of the patient to sync
    pub patient: String,

    /// Update the registry record instead of creating it
    #[arg(long)]
    pub update: bool,

    /// Dry run mode - log the registry request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let patient = match PatientUuid::new(self.patient.as_str()) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Invalid patient uuid: {e}");
                return Ok(1);
            }
        };
        let intent = if self.update {
            Intent::Update
        } else {
            Intent::Create
        };

        tracing::info!(patient = %patient, intent = %intent, "Starting sync command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let pipeline = match build_pipeline(&config, self.dry_run) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build sync pipeline");
                eprintln!("Failed to initialize: {e}");
                return Ok(2);
            }
        };

        let token = SystemToken::issue(SystemPrincipal::from_config(&config.source));
        let ctx = ExecutionContext::elevate(Some(&token))?;
        let notification = Notification { patient, intent };

        match pipeline.process(&ctx, &notification).await {
            Ok(delivery) => {
                crate::log_sync_complete!(&notification.patient, intent, delivery);
                match delivery {
                    Delivery::Delivered => {
                        println!("Patient {} synced ({})", notification.patient, intent)
                    }
                    Delivery::FormatRejectionTolerated => println!(
                        "Patient {} sent ({}), registry response not understood",
                        notification.patient, intent
                    ),
                }
                Ok(0)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Patient sync failed");
                eprintln!("Sync failed for patient {}: {e}", notification.patient);
                Ok(1)
            }
        }
    }
}
