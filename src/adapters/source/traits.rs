//! Record source abstraction
//!
//! The pipeline only ever reads from the source system. Both lookups take the
//! execution context so implementations authenticate as its system principal.

use crate::core::context::ExecutionContext;
use crate::domain::{CustomAttribute, Patient, PatientUuid, Result};
use async_trait::async_trait;

/// Read access to patient demographics and person attributes
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Resolves a patient to its FHIR representation
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SourceError::NotFound`] if no patient has the uuid,
    /// or another source error if the lookup fails.
    async fn resolve(&self, ctx: &ExecutionContext, patient: &PatientUuid) -> Result<Patient>;

    /// Lists the person attributes of a patient, voided ones included
    ///
    /// Callers filter with [`CustomAttribute::is_active`].
    async fn attributes_for_person(
        &self,
        ctx: &ExecutionContext,
        patient: &PatientUuid,
    ) -> Result<Vec<CustomAttribute>>;
}
