//! Registry dispatch
//!
//! Routes a representation to create or update and decides which create
//! failures are tolerated. Some registries accept a create but answer in a
//! format the client cannot parse; that answer is logged as a warning and the
//! message counts as handled. Update failures are never tolerated.

use crate::adapters::registry::RegistryClient;
use crate::domain::{Intent, Patient, RegistryError, Result};

/// Classification of a registry call result
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The registry accepted the request
    Ok,
    /// Connection error caused by a format the client could not understand
    TransientFormatRejection(RegistryError),
    /// Any other failure
    Fatal(RegistryError),
}

/// How a dispatched message ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The registry accepted the request
    Delivered,
    /// A create was answered with a format rejection, which is tolerated
    FormatRejectionTolerated,
}

/// Classifies the result of a create call
pub fn classify_create(result: std::result::Result<(), RegistryError>) -> DispatchOutcome {
    match result {
        Ok(()) => DispatchOutcome::Ok,
        Err(e) if e.is_data_format_rejection() => DispatchOutcome::TransientFormatRejection(e),
        Err(e) => DispatchOutcome::Fatal(e),
    }
}

/// Sends a representation to the registry according to intent
///
/// # Errors
///
/// Returns any update failure, and any create failure other than a format
/// rejection.
pub async fn dispatch(
    registry: &dyn RegistryClient,
    resource: &Patient,
    intent: Intent,
) -> Result<Delivery> {
    match intent {
        Intent::Update => {
            registry.update(resource).await?;
            Ok(Delivery::Delivered)
        }
        Intent::Create => match classify_create(registry.create(resource).await) {
            DispatchOutcome::Ok => Ok(Delivery::Delivered),
            DispatchOutcome::TransientFormatRejection(e) => {
                tracing::warn!(id = ?resource.id, error = %e, "Client registry response format not understood");
                Ok(Delivery::FormatRejectionTolerated)
            }
            DispatchOutcome::Fatal(e) => Err(e.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CrSyncError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Failure {
        None,
        DataFormat,
        Transport,
        Rejected,
    }

    impl Failure {
        fn to_result(self) -> std::result::Result<(), RegistryError> {
            match self {
                Failure::None => Ok(()),
                Failure::DataFormat => Err(RegistryError::data_format("create", "bad json")),
                Failure::Transport => Err(RegistryError::transport("create", "refused")),
                Failure::Rejected => Err(RegistryError::Rejected {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    struct StubRegistry {
        failure: Failure,
        creates: AtomicUsize,
        updates: AtomicUsize,
    }

    impl StubRegistry {
        fn new(failure: Failure) -> Self {
            Self {
                failure,
                creates: AtomicUsize::new(0),
                updates: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RegistryClient for StubRegistry {
        async fn create(&self, _: &Patient) -> std::result::Result<(), RegistryError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.failure.to_result()
        }

        async fn update(&self, _: &Patient) -> std::result::Result<(), RegistryError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.failure.to_result()
        }
    }

    #[test]
    fn test_classify_create() {
        assert!(matches!(classify_create(Ok(())), DispatchOutcome::Ok));
        assert!(matches!(
            classify_create(Failure::DataFormat.to_result()),
            DispatchOutcome::TransientFormatRejection(_)
        ));
        assert!(matches!(
            classify_create(Failure::Transport.to_result()),
            DispatchOutcome::Fatal(_)
        ));
        assert!(matches!(
            classify_create(Failure::Rejected.to_result()),
            DispatchOutcome::Fatal(_)
        ));
    }

    #[tokio::test]
    async fn test_create_intent_calls_create_only() {
        let registry = StubRegistry::new(Failure::None);
        let delivery = dispatch(&registry, &Patient::default(), Intent::Create)
            .await
            .unwrap();
        assert_eq!(delivery, Delivery::Delivered);
        assert_eq!(registry.creates.load(Ordering::SeqCst), 1);
        assert_eq!(registry.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_intent_calls_update_only() {
        let registry = StubRegistry::new(Failure::None);
        dispatch(&registry, &Patient::default(), Intent::Update)
            .await
            .unwrap();
        assert_eq!(registry.creates.load(Ordering::SeqCst), 0);
        assert_eq!(registry.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_format_rejection_is_tolerated() {
        let registry = StubRegistry::new(Failure::DataFormat);
        let delivery = dispatch(&registry, &Patient::default(), Intent::Create)
            .await
            .unwrap();
        assert_eq!(delivery, Delivery::FormatRejectionTolerated);
        assert_eq!(registry.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_transport_failure_propagates() {
        let registry = StubRegistry::new(Failure::Transport);
        let err = dispatch(&registry, &Patient::default(), Intent::Create)
            .await
            .unwrap_err();
        assert!(matches!(err, CrSyncError::Registry(RegistryError::Connection { .. })));
    }

    #[tokio::test]
    async fn test_update_format_rejection_propagates() {
        let registry = StubRegistry::new(Failure::DataFormat);
        let err = dispatch(&registry, &Patient::default(), Intent::Update)
            .await
            .unwrap_err();
        assert!(matches!(err, CrSyncError::Registry(_)));
    }
}
