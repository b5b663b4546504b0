//! External system integrations for crsync.
//!
//! - [`source`] - reads patients and person attributes from the source system
//! - [`registry`] - pushes patients to the client registry
//! - [`http`] - HTTP client construction shared by both
//!
//! Both integrations sit behind traits ([`source::RecordSource`],
//! [`registry::RegistryClient`]) so the pipeline can be exercised with
//! in-memory implementations.

pub mod http;
pub mod registry;
pub mod source;
