//! Domain models and types for crsync.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientUuid`], [`AttributeTypeId`])
//! - **FHIR models** ([`Patient`], [`HumanName`], [`ContactPoint`], [`Identifier`], [`Extension`])
//! - **Messages** ([`InboundMessage`], [`MapMessage`], [`Notification`], [`Intent`])
//! - **Error types** ([`CrSyncError`], [`SourceError`], [`RegistryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CrSyncError>`]:
//!
//! ```rust
//! use crsync::domain::{PatientUuid, CrSyncError, Result};
//!
//! fn example(raw: &str) -> Result<PatientUuid> {
//!     PatientUuid::new(raw).map_err(CrSyncError::Validation)
//! }
//! ```

pub mod attribute;
pub mod constants;
pub mod errors;
pub mod ids;
pub mod message;
pub mod patient;
pub mod result;

// Re-export commonly used types for convenience
pub use attribute::{CustomAttribute, ExtensionMappingRule};
pub use errors::{ConnectionCause, CrSyncError, MessageError, RegistryError, SourceError};
pub use ids::{AttributeTypeId, PatientUuid};
pub use message::{InboundMessage, Intent, MapMessage, Notification};
pub use patient::{
    ContactPoint, ContactPointSystem, ContactPointUse, Extension, HumanName, Identifier,
    IdentifierUse, NameUse, Patient,
};
pub use result::Result;
