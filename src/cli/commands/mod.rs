//! CLI command implementations
//!
//! Commands return `anyhow::Result<i32>` where the integer is the process
//! exit code: 0 success, 1 sync failed, 2 configuration error, 5 fatal.

pub mod init;
pub mod listen;
pub mod sync;
pub mod validate;

use crate::adapters::registry::create_registry_client;
use crate::adapters::source::OpenMrsRecordSource;
use crate::config::CrSyncConfig;
use crate::core::listener::SyncPipeline;
use crate::domain::Result;
use std::sync::Arc;

/// Builds the sync pipeline from configuration
///
/// `dry_run` is OR-ed with `application.dry_run`.
pub(crate) fn build_pipeline(config: &CrSyncConfig, dry_run: bool) -> Result<SyncPipeline> {
    let source = Arc::new(OpenMrsRecordSource::new(&config.source)?);
    let registry = create_registry_client(&config.registry, dry_run || config.application.dry_run)?;
    let settings = config.client_registry.settings();

    tracing::info!(
        identifier_root = %settings.identifier_root(),
        extension_rules = settings.extension_rules().len(),
        "Client registry settings loaded"
    );

    Ok(SyncPipeline::new(source, registry, settings))
}
