//! Client registry abstraction

use crate::domain::{Patient, RegistryError};
use async_trait::async_trait;

/// Create/update access to the client registry
///
/// Errors are returned as [`RegistryError`] rather than the crate-wide error so
/// callers can inspect the cause of a connection failure.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Creates the patient in the registry
    async fn create(&self, patient: &Patient) -> Result<(), RegistryError>;

    /// Updates the patient in the registry, addressed by its id
    async fn update(&self, patient: &Patient) -> Result<(), RegistryError>;
}
