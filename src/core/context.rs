//! Elevated execution context
//!
//! Messages arrive outside any authenticated request, so every handler runs as
//! the configured system account. The account travels explicitly in an
//! [`ExecutionContext`]; nothing reads an ambient identity.

use crate::config::{SecretString, SourceConfig};
use crate::domain::{CrSyncError, Result};
use std::sync::Arc;
use uuid::Uuid;

/// The system-level identity handlers act as
#[derive(Debug, Clone)]
pub struct SystemPrincipal {
    username: String,
    password: SecretString,
}

impl SystemPrincipal {
    /// Creates a principal from system account credentials
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Builds the principal from the source configuration
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    /// System account username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// System account password
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// Capability to open elevated execution contexts
///
/// Issued once when the listener is activated. Until a token is issued no
/// message can be processed.
#[derive(Debug, Clone)]
pub struct SystemToken {
    principal: Arc<SystemPrincipal>,
}

impl SystemToken {
    /// Issues a token for a principal
    pub fn issue(principal: SystemPrincipal) -> Self {
        Self {
            principal: Arc::new(principal),
        }
    }
}

/// Context a single message is processed in
///
/// Never shared between messages: each one gets a fresh context with its own
/// correlation id.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    principal: Arc<SystemPrincipal>,
    correlation_id: Uuid,
}

impl ExecutionContext {
    /// Opens a system-level context
    ///
    /// # Errors
    ///
    /// Returns [`CrSyncError::Context`] if no system token has been issued.
    pub fn elevate(token: Option<&SystemToken>) -> Result<Self> {
        let token = token.ok_or_else(|| {
            CrSyncError::Context("no system token has been issued to the listener".to_string())
        })?;

        Ok(Self {
            principal: Arc::clone(&token.principal),
            correlation_id: Uuid::new_v4(),
        })
    }

    /// Principal the context acts as
    pub fn principal(&self) -> &SystemPrincipal {
        &self.principal
    }

    /// Id tying together the log lines of one message
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn token() -> SystemToken {
        SystemToken::issue(SystemPrincipal::new(
            "daemon",
            secret_string("secret".to_string()),
        ))
    }

    #[test]
    fn test_elevate_without_token_fails() {
        let err = ExecutionContext::elevate(None).unwrap_err();
        assert!(matches!(err, CrSyncError::Context(_)));
    }

    #[test]
    fn test_elevate_carries_system_principal() {
        let token = token();
        let ctx = ExecutionContext::elevate(Some(&token)).unwrap();
        assert_eq!(ctx.principal().username(), "daemon");
    }

    #[test]
    fn test_each_context_gets_its_own_correlation_id() {
        let token = token();
        let a = ExecutionContext::elevate(Some(&token)).unwrap();
        let b = ExecutionContext::elevate(Some(&token)).unwrap();
        assert_ne!(a.correlation_id(), b.correlation_id());
    }
}
