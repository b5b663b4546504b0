//! Message intake
//!
//! [`MessageDispatcher::on_message`] is the entry point the message bus calls.
//! It picks the patient uuid and intent out of a map message, opens an
//! elevated [`ExecutionContext`] and hands the rest of the work to a spawned
//! task running the [`SyncPipeline`]. Nothing it does can fail its caller:
//! ignored messages, context failures and pipeline errors all end in a log line.

use crate::adapters::registry::RegistryClient;
use crate::adapters::source::RecordSource;
use crate::config::ClientRegistrySettings;
use crate::core::context::{ExecutionContext, SystemToken};
use crate::core::dispatch::{dispatch, Delivery};
use crate::core::enrich::ExtensionEnricher;
use crate::core::transform::RecordTransformer;
use crate::domain::constants::PATIENT_UUID_PROPERTY;
use crate::domain::{InboundMessage, Intent, Notification, PatientUuid, Result};
use std::sync::{Arc, OnceLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Transformer → enricher → registry, for one notification at a time
pub struct SyncPipeline {
    transformer: RecordTransformer,
    enricher: ExtensionEnricher,
    registry: Arc<dyn RegistryClient>,
}

impl SyncPipeline {
    /// Wires the pipeline stages over shared collaborators
    pub fn new(
        source: Arc<dyn RecordSource>,
        registry: Arc<dyn RegistryClient>,
        settings: ClientRegistrySettings,
    ) -> Self {
        let settings = Arc::new(settings);
        Self {
            transformer: RecordTransformer::new(Arc::clone(&source), Arc::clone(&settings)),
            enricher: ExtensionEnricher::new(source, settings),
            registry,
        }
    }

    /// Loads, transforms, enriches and dispatches one patient
    ///
    /// # Errors
    ///
    /// Returns the first failure of any stage, except a tolerated create
    /// format rejection.
    pub async fn process(
        &self,
        ctx: &ExecutionContext,
        notification: &Notification,
    ) -> Result<Delivery> {
        let patient = &notification.patient;
        let resource = self.transformer.transform(ctx, patient).await?;
        let resource = self.enricher.enrich(ctx, resource, patient).await?;
        dispatch(self.registry.as_ref(), &resource, notification.intent).await
    }
}

struct DispatcherInner {
    pipeline: SyncPipeline,
    update_destination: String,
    token: OnceLock<SystemToken>,
}

/// Receives bus messages and runs each one in its own elevated task
///
/// Cloning is cheap; clones share the pipeline and the system token.
#[derive(Clone)]
pub struct MessageDispatcher {
    inner: Arc<DispatcherInner>,
}

impl MessageDispatcher {
    /// Creates a dispatcher; messages on `update_destination` are updates,
    /// everything else is a create
    pub fn new(pipeline: SyncPipeline, update_destination: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                pipeline,
                update_destination: update_destination.into(),
                token: OnceLock::new(),
            }),
        }
    }

    /// Issues the system token elevated contexts are opened with
    ///
    /// Returns false if a token was already set; the first one stays.
    pub fn set_system_token(&self, token: SystemToken) -> bool {
        self.inner.token.set(token).is_ok()
    }

    /// Extracts the notification a message carries, if any
    ///
    /// Non-map messages, unreadable or blank uuids all yield `None`.
    pub fn extract_notification(&self, message: &InboundMessage) -> Option<Notification> {
        let map = message.as_map()?;

        let uuid = match map.get_string(PATIENT_UUID_PROPERTY) {
            Ok(uuid) => uuid?,
            Err(e) => {
                tracing::debug!(error = %e, "Could not read patient uuid from message");
                return None;
            }
        };

        let patient = PatientUuid::new(uuid).ok()?;
        tracing::debug!(patient = %patient, "Handling patient");

        Some(Notification {
            patient,
            intent: Intent::from_destination(map.destination(), &self.inner.update_destination),
        })
    }

    /// Handles one message from the bus
    ///
    /// Returns the handle of the spawned task, or `None` if the message was
    /// dropped before a task was started. Never panics and never returns an
    /// error.
    pub fn on_message(&self, message: InboundMessage) -> Option<JoinHandle<Option<Delivery>>> {
        crate::log_message_received!(&message);

        let notification = self.extract_notification(&message)?;

        let started = ExecutionContext::elevate(self.inner.token.get()).and_then(|ctx| {
            Handle::try_current()
                .map(|runtime| (ctx, runtime))
                .map_err(|e| crate::domain::CrSyncError::Context(e.to_string()))
        });

        let (ctx, runtime) = match started {
            Ok(started) => started,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    message = %message,
                    "Failed to start execution context to process message"
                );
                return None;
            }
        };

        let dispatcher = self.clone();
        Some(runtime.spawn(async move { dispatcher.run(ctx, notification, message).await }))
    }

    /// Runs the pipeline for one notification inside an already opened context
    ///
    /// Errors are logged with the message content and swallowed.
    pub async fn run(
        &self,
        ctx: ExecutionContext,
        notification: Notification,
        message: InboundMessage,
    ) -> Option<Delivery> {
        let span = tracing::info_span!(
            "patient_sync",
            patient = %notification.patient,
            intent = %notification.intent,
            correlation_id = %ctx.correlation_id(),
        );

        match self
            .inner
            .pipeline
            .process(&ctx, &notification)
            .instrument(span)
            .await
        {
            Ok(delivery) => {
                crate::log_sync_complete!(&notification.patient, notification.intent, delivery);
                Some(delivery)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    patient = %notification.patient,
                    message = %message,
                    "Failed to process patient message"
                );
                None
            }
        }
    }
}
