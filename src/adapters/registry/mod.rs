//! Client registry adapter
//!
//! [`RegistryClient`] is the seam the dispatcher pushes through.
//! [`create_registry_client`] picks the HTTP client or the dry-run stand-in.

pub mod dry_run;
pub mod fhir;
pub mod traits;

pub use dry_run::DryRunRegistry;
pub use fhir::FhirRegistryClient;
pub use traits::RegistryClient;

use crate::config::RegistryConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Builds the registry client for a run
///
/// # Errors
///
/// Returns a configuration error if the HTTP client cannot be built.
pub fn create_registry_client(
    config: &RegistryConfig,
    dry_run: bool,
) -> Result<Arc<dyn RegistryClient>> {
    if dry_run {
        tracing::info!("Dry run enabled, client registry requests will only be logged");
        return Ok(Arc::new(DryRunRegistry));
    }

    let client = FhirRegistryClient::new(config)?;
    tracing::info!(base_url = %client.base_url(), "Using FHIR client registry");
    Ok(Arc::new(client))
}
