//! Record transformation
//!
//! Turns the source system's FHIR Patient into what the client registry
//! expects:
//!
//! 1. the first name is the official one,
//! 2. every telecom is a mobile phone,
//! 3. one identifier `<root>/<uuid>` is minted under
//!    [`CLIENT_REGISTRY_INTERNAL_ID_SYSTEM`],
//! 4. the resource id is the minted value.
//!
//! The id only depends on the identifier root and the patient uuid, so a
//! repeated create for the same patient addresses the same registry record.

use crate::adapters::source::RecordSource;
use crate::config::ClientRegistrySettings;
use crate::core::context::ExecutionContext;
use crate::domain::constants::CLIENT_REGISTRY_INTERNAL_ID_SYSTEM;
use crate::domain::{
    ContactPointSystem, ContactPointUse, Identifier, IdentifierUse, NameUse, Patient, PatientUuid,
    Result,
};
use std::sync::Arc;

/// Builds the minted identifier for a patient
pub fn mint_identifier(identifier_root: &str, patient: &PatientUuid) -> Identifier {
    Identifier {
        use_: Some(IdentifierUse::Official),
        system: Some(CLIENT_REGISTRY_INTERNAL_ID_SYSTEM.to_string()),
        value: Some(format!("{identifier_root}/{patient}")),
        ..Default::default()
    }
}

/// Applies the registry normalization rules to a resolved patient
pub fn normalize(mut resource: Patient, identifier_root: &str, patient: &PatientUuid) -> Patient {
    resource.name_first_rep().use_ = Some(NameUse::Official);

    for contact_point in &mut resource.telecom {
        contact_point.system = Some(ContactPointSystem::Phone);
        contact_point.use_ = Some(ContactPointUse::Mobile);
    }

    let minted = mint_identifier(identifier_root, patient);
    resource.id = minted.value.clone();
    resource.identifier.push(minted);

    resource
}

/// Loads a patient and applies the normalization rules
pub struct RecordTransformer {
    source: Arc<dyn RecordSource>,
    settings: Arc<ClientRegistrySettings>,
}

impl RecordTransformer {
    /// Create a transformer over a record source
    pub fn new(source: Arc<dyn RecordSource>, settings: Arc<ClientRegistrySettings>) -> Self {
        Self { source, settings }
    }

    /// Resolves the patient and returns its registry representation
    ///
    /// # Errors
    ///
    /// Returns the source error if the patient cannot be resolved.
    pub async fn transform(&self, ctx: &ExecutionContext, patient: &PatientUuid) -> Result<Patient> {
        let resource = self.source.resolve(ctx, patient).await?;
        let resource = normalize(resource, self.settings.identifier_root(), patient);

        tracing::debug!(
            patient = %patient,
            id = ?resource.id,
            telecoms = resource.telecom.len(),
            "Transformed patient for client registry"
        );

        Ok(resource)
    }
}
