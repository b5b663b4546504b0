// crsync - Client Registry Patient Sync
// Copyright (c) 2025 crsync Contributors
// Licensed under the MIT License

//! # crsync - Client Registry Patient Sync
//!
//! crsync keeps a FHIR client registry in step with patient records held in
//! an OpenMRS source system. Every patient create or update notification
//! triggers a push of that patient to the registry.
//!
//! ## Overview
//!
//! For each notification this library:
//! - **Resolves** the patient from the source system as a FHIR Patient
//! - **Normalizes** it (official first name, mobile phone telecoms, a minted
//!   registry identifier used as the resource id)
//! - **Enriches** it with one extension per configured person attribute mapping
//! - **Dispatches** it to the registry as a create or an update
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Sync logic (context, transform, enrich, dispatch, listener)
//! - [`adapters`] - Source system and client registry HTTP integrations
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crsync::adapters::registry::create_registry_client;
//! use crsync::adapters::source::OpenMrsRecordSource;
//! use crsync::config::load_config;
//! use crsync::core::context::{SystemPrincipal, SystemToken};
//! use crsync::core::listener::{MessageDispatcher, SyncPipeline};
//! use crsync::domain::InboundMessage;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("crsync.toml")?;
//!
//!     let source = Arc::new(OpenMrsRecordSource::new(&config.source)?);
//!     let registry = create_registry_client(&config.registry, config.application.dry_run)?;
//!     let pipeline = SyncPipeline::new(source, registry, config.client_registry.settings());
//!
//!     let dispatcher = MessageDispatcher::new(pipeline, &config.messaging.update_destination);
//!     dispatcher.set_system_token(SystemToken::issue(SystemPrincipal::from_config(&config.source)));
//!
//!     let message = InboundMessage::from_json_line(
//!         r#"{"type":"map","destination":"topic://CREATED:org.openmrs.Patient","body":{"uuid":"5946f880-b197-400b-9caa-a3c661d23041"}}"#,
//!     )?;
//!     if let Some(handle) = dispatcher.on_message(message) {
//!         handle.await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! crsync uses the [`domain::CrSyncError`] type for all library errors:
//!
//! ```rust,no_run
//! use crsync::domain::CrSyncError;
//!
//! fn example() -> Result<(), CrSyncError> {
//!     let config = crsync::config::load_config("crsync.toml")?;
//!     println!("Registry: {}", config.registry.base_url);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
