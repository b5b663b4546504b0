//! Core sync logic for crsync.
//!
//! # Modules
//!
//! - [`context`] - Elevated execution context and the system principal it runs as
//! - [`transform`] - Source patient to client registry representation
//! - [`enrich`] - Person attributes to FHIR extensions
//! - [`dispatch`] - Create/update routing and create failure tolerance
//! - [`listener`] - Message intake and the per-message pipeline
//!
//! # Sync Workflow
//!
//! For every patient create or update notification:
//!
//! 1. **Extract**: Read the patient uuid from the map message, pick the intent
//!    from the destination
//! 2. **Elevate**: Open an execution context as the system principal
//! 3. **Transform**: Resolve the patient and normalize it for the registry
//! 4. **Enrich**: Add one extension per configured attribute mapping
//! 5. **Dispatch**: Create or update the registry record
//!
//! # Example
//!
//! ```rust,no_run
//! use crsync::adapters::registry::create_registry_client;
//! use crsync::adapters::source::OpenMrsRecordSource;
//! use crsync::config::load_config;
//! use crsync::core::context::{SystemPrincipal, SystemToken};
//! use crsync::core::listener::{MessageDispatcher, SyncPipeline};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("crsync.toml")?;
//!
//! let source = Arc::new(OpenMrsRecordSource::new(&config.source)?);
//! let registry = create_registry_client(&config.registry, false)?;
//! let pipeline = SyncPipeline::new(source, registry, config.client_registry.settings());
//!
//! let dispatcher = MessageDispatcher::new(pipeline, &config.messaging.update_destination);
//! dispatcher.set_system_token(SystemToken::issue(SystemPrincipal::from_config(&config.source)));
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod dispatch;
pub mod enrich;
pub mod listener;
pub mod transform;
