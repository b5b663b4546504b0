//! Record source adapter
//!
//! [`RecordSource`] is the seam the pipeline reads patients through;
//! [`OpenMrsRecordSource`] implements it over HTTP.

pub mod models;
pub mod openmrs;
pub mod traits;

pub use openmrs::OpenMrsRecordSource;
pub use traits::RecordSource;
