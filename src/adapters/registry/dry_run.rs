//! Registry stand-in for dry runs
//!
//! Logs what would have been sent and reports success.

use super::traits::RegistryClient;
use crate::domain::{Patient, RegistryError};
use async_trait::async_trait;

/// Registry client that never leaves the process
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRegistry;

impl DryRunRegistry {
    fn log(operation: &str, patient: &Patient) -> Result<(), RegistryError> {
        let body =
            serde_json::to_string(patient).map_err(|e| RegistryError::Encoding(e.to_string()))?;
        tracing::info!(
            operation,
            id = ?patient.id,
            resource = %body,
            "Dry run: skipping client registry request"
        );
        Ok(())
    }
}

#[async_trait]
impl RegistryClient for DryRunRegistry {
    async fn create(&self, patient: &Patient) -> Result<(), RegistryError> {
        Self::log("create", patient)
    }

    async fn update(&self, patient: &Patient) -> Result<(), RegistryError> {
        Self::log("update", patient)
    }
}
