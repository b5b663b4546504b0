//! FHIR REST client for the client registry
//!
//! Create is `POST {base}/Patient`, update is `PUT {base}/Patient/{id}`.
//! Responses are classified so the dispatcher can tell a format rejection from
//! a real failure:
//!
//! - the request never completes: [`ConnectionCause::Transport`]
//! - a 2xx whose body is not a JSON resource: [`ConnectionCause::DataFormat`]
//! - any non-2xx status: [`RegistryError::Rejected`]
//!
//! [`ConnectionCause::Transport`]: crate::domain::ConnectionCause::Transport
//! [`ConnectionCause::DataFormat`]: crate::domain::ConnectionCause::DataFormat

use super::traits::RegistryClient;
use crate::adapters::http::{basic_auth_value, build_http_client, join_segments, parse_base_url};
use crate::config::{RegistryConfig, SecretString};
use crate::domain::constants::FHIR_JSON_CONTENT_TYPE;
use crate::domain::{Patient, RegistryError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::ExposeSecret;
use url::Url;

/// Client registry reached over FHIR REST
pub struct FhirRegistryClient {
    base_url: Url,
    client: Client,
    username: Option<String>,
    password: Option<SecretString>,
}

impl FhirRegistryClient {
    /// Create a new registry client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url("registry.base_url", &config.base_url)?,
            client: build_http_client(config.timeout_seconds, config.tls_verify)?,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Base URL of the registry
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header("Content-Type", FHIR_JSON_CONTENT_TYPE)
            .header("Accept", FHIR_JSON_CONTENT_TYPE);

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => request.header(
                "Authorization",
                basic_auth_value(username, password.expose_secret().as_ref()),
            ),
            _ => request,
        }
    }

    async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
        patient: &Patient,
    ) -> std::result::Result<(), RegistryError> {
        let body =
            serde_json::to_vec(patient).map_err(|e| RegistryError::Encoding(e.to_string()))?;

        let response = self
            .with_headers(request)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                RegistryError::transport(format!("{operation} request failed"), e.to_string())
            })?;

        check_response(operation, response).await
    }
}

/// Interprets a registry response
async fn check_response(
    operation: &str,
    response: Response,
) -> std::result::Result<(), RegistryError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RegistryError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await.map_err(|e| {
        RegistryError::transport(format!("{operation} response could not be read"), e.to_string())
    })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) if value.is_object() => Ok(()),
        Ok(_) => Err(RegistryError::data_format(
            format!("{operation} response is not a FHIR resource"),
            "expected a JSON object",
        )),
        Err(e) => Err(RegistryError::data_format(
            format!("{operation} response could not be parsed"),
            e.to_string(),
        )),
    }
}

#[async_trait]
impl RegistryClient for FhirRegistryClient {
    async fn create(&self, patient: &Patient) -> std::result::Result<(), RegistryError> {
        let url = join_segments(&self.base_url, &["Patient"]);
        tracing::debug!(url = %url, id = ?patient.id, "Creating patient in client registry");
        self.execute("create", self.client.post(url), patient).await
    }

    async fn update(&self, patient: &Patient) -> std::result::Result<(), RegistryError> {
        let id = patient
            .id
            .as_deref()
            .ok_or_else(|| RegistryError::MissingId("update requires a resource id".to_string()))?;
        let url = join_segments(&self.base_url, &["Patient", id]);
        tracing::debug!(url = %url, "Updating patient in client registry");
        self.execute("update", self.client.put(url), patient).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RegistryConfig {
        RegistryConfig {
            base_url: "http://localhost:3000/fhir".to_string(),
            username: None,
            password: None,
            timeout_seconds: 5,
            tls_verify: true,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = FhirRegistryClient::new(&config()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/fhir");
    }

    #[tokio::test]
    async fn test_update_without_id_fails_before_sending() {
        let client = FhirRegistryClient::new(&config()).unwrap();
        let err = client.update(&Patient::default()).await.unwrap_err();
        assert!(matches!(err, RegistryError::MissingId(_)));
    }
}
