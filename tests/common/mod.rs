//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use crsync::adapters::registry::RegistryClient;
use crsync::adapters::source::RecordSource;
use crsync::config::{secret_string, ClientRegistrySettings};
use crsync::core::context::{ExecutionContext, SystemPrincipal, SystemToken};
use crsync::core::listener::{MessageDispatcher, SyncPipeline};
use crsync::domain::{
    AttributeTypeId, CustomAttribute, InboundMessage, MapMessage, Patient, PatientUuid,
    RegistryError, Result, SourceError,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ROOT: &str = "http://clientregistry.org/openmrs";
pub const UPDATED: &str = "topic://UPDATED:org.openmrs.Patient";
pub const CREATED: &str = "topic://CREATED:org.openmrs.Patient";

/// Record source serving fixed patients and attributes
#[derive(Default)]
pub struct FakeSource {
    pub patients: HashMap<String, Patient>,
    pub attributes: HashMap<String, Vec<CustomAttribute>>,
    pub resolve_calls: AtomicUsize,
    pub attribute_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_patient(mut self, uuid: &str, patient: Patient) -> Self {
        self.patients.insert(uuid.to_string(), patient);
        self
    }

    pub fn with_attribute(mut self, uuid: &str, type_id: &str, value: &str) -> Self {
        self.attributes
            .entry(uuid.to_string())
            .or_default()
            .push(CustomAttribute::new(AttributeTypeId::new(type_id).unwrap(), value));
        self
    }

    pub fn calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst) + self.attribute_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for FakeSource {
    async fn resolve(&self, _ctx: &ExecutionContext, patient: &PatientUuid) -> Result<Patient> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.patients
            .get(patient.as_str())
            .cloned()
            .ok_or_else(|| SourceError::NotFound(patient.to_string()).into())
    }

    async fn attributes_for_person(
        &self,
        _ctx: &ExecutionContext,
        patient: &PatientUuid,
    ) -> Result<Vec<CustomAttribute>> {
        self.attribute_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .attributes
            .get(patient.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

/// How the fake registry answers
#[derive(Clone, Copy, Default)]
pub enum Answer {
    #[default]
    Accept,
    DataFormat,
    Transport,
    Reject,
    /// Never answers until the task is cancelled
    Hang,
}

/// Registry recording every representation it receives
#[derive(Default)]
pub struct FakeRegistry {
    pub answer: Answer,
    pub created: Mutex<Vec<Patient>>,
    pub updated: Mutex<Vec<Patient>>,
    /// Hanging calls that were cancelled
    pub released: AtomicUsize,
}

struct ReleaseOnDrop<'a>(&'a AtomicUsize);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl FakeRegistry {
    pub fn answering(answer: Answer) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }

    pub fn created(&self) -> Vec<Patient> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<Patient> {
        self.updated.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.created().len() + self.updated().len()
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    async fn settle(&self) -> std::result::Result<(), RegistryError> {
        if let Answer::Hang = self.answer {
            let _release = ReleaseOnDrop(&self.released);
            std::future::pending::<()>().await;
        }
        self.answer()
    }

    fn answer(&self) -> std::result::Result<(), RegistryError> {
        match self.answer {
            Answer::Accept | Answer::Hang => Ok(()),
            Answer::DataFormat => Err(RegistryError::data_format(
                "create response could not be parsed",
                "expected value at line 1 column 1",
            )),
            Answer::Transport => Err(RegistryError::transport(
                "create request failed",
                "connection refused",
            )),
            Answer::Reject => Err(RegistryError::Rejected {
                status: 422,
                message: "Unprocessable".to_string(),
            }),
        }
    }
}

#[async_trait]
impl RegistryClient for FakeRegistry {
    async fn create(&self, patient: &Patient) -> std::result::Result<(), RegistryError> {
        self.created.lock().unwrap().push(patient.clone());
        self.settle().await
    }

    async fn update(&self, patient: &Patient) -> std::result::Result<(), RegistryError> {
        self.updated.lock().unwrap().push(patient.clone());
        self.settle().await
    }
}

pub fn token() -> SystemToken {
    SystemToken::issue(SystemPrincipal::new(
        "daemon",
        secret_string("secret".to_string()),
    ))
}

pub fn elevated() -> ExecutionContext {
    ExecutionContext::elevate(Some(&token())).unwrap()
}

pub fn dispatcher(
    source: Arc<FakeSource>,
    registry: Arc<FakeRegistry>,
    mapping: &str,
) -> MessageDispatcher {
    let pipeline = SyncPipeline::new(source, registry, ClientRegistrySettings::new(ROOT, mapping));
    let dispatcher = MessageDispatcher::new(pipeline, UPDATED);
    dispatcher.set_system_token(token());
    dispatcher
}

pub fn map_message(destination: &str, uuid: Value) -> InboundMessage {
    InboundMessage::Map(MapMessage::new(destination, Map::new()).with_property("uuid", uuid))
}
