//! Fixed URIs and destination names shared with the source system and registry

/* Identifier Systems */

/// System of the identifier minted for every synchronized patient.
///
/// The registry keys upserts on this system, so the value must never change.
pub const CLIENT_REGISTRY_INTERNAL_ID_SYSTEM: &str = "http://openclientregistry.org/fhir/sourceid";

/* Message Destinations */
pub const UPDATE_MESSAGE_DESTINATION: &str = "topic://UPDATED:org.openmrs.Patient";
pub const CREATE_MESSAGE_DESTINATION: &str = "topic://CREATED:org.openmrs.Patient";

/* Message Properties */
pub const PATIENT_UUID_PROPERTY: &str = "uuid";

/* FHIR Content Types */
pub const FHIR_JSON_CONTENT_TYPE: &str = "application/fhir+json";
