//! OpenMRS record source
//!
//! Patients are read through the FHIR2 module (`/ws/fhir2/R4/Patient/{uuid}`),
//! which already shapes names and telecoms for the wire. Person attributes have
//! no FHIR mapping and come from the REST API instead.

use super::models::AttributeListResponse;
use super::traits::RecordSource;
use crate::adapters::http::{basic_auth_value, build_http_client, join_segments, parse_base_url};
use crate::config::SourceConfig;
use crate::core::context::ExecutionContext;
use crate::domain::constants::FHIR_JSON_CONTENT_TYPE;
use crate::domain::{CustomAttribute, Patient, PatientUuid, Result, SourceError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use url::Url;

/// Record source backed by an OpenMRS server
pub struct OpenMrsRecordSource {
    base_url: Url,
    client: Client,
}

impl OpenMrsRecordSource {
    /// Create a new source from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid or the HTTP
    /// client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use crsync::adapters::source::OpenMrsRecordSource;
    /// use crsync::config::{secret_string, SourceConfig};
    ///
    /// # fn example() -> crsync::domain::Result<()> {
    /// let config = SourceConfig {
    ///     base_url: "http://localhost:8080/openmrs".to_string(),
    ///     username: "daemon".to_string(),
    ///     password: secret_string("secret".to_string()),
    ///     timeout_seconds: 30,
    ///     tls_verify: true,
    /// };
    /// let source = OpenMrsRecordSource::new(&config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url("source.base_url", &config.base_url)?,
            client: build_http_client(config.timeout_seconds, config.tls_verify)?,
        })
    }

    /// Base URL of the OpenMRS server
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn get(&self, ctx: &ExecutionContext, url: Url, accept: &str) -> Result<Response> {
        let principal = ctx.principal();
        let auth = basic_auth_value(
            principal.username(),
            principal.password().expose_secret().as_ref(),
        );

        tracing::debug!(
            url = %url,
            correlation_id = %ctx.correlation_id(),
            "Requesting record source"
        );

        let response = self
            .client
            .get(url.clone())
            .header("Authorization", auth)
            .header("Accept", accept)
            .send()
            .await
            .map_err(|e| SourceError::ConnectionFailed(format!("{url}: {e}")))?;

        Ok(response)
    }
}

/// Maps a non-success status to a source error
async fn status_error(response: Response, patient: &PatientUuid) -> SourceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => SourceError::NotFound(patient.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SourceError::AuthenticationFailed(format!("status {status}: {body}"))
        }
        _ => SourceError::Status {
            status: status.as_u16(),
            message: body,
        },
    }
}

#[async_trait]
impl RecordSource for OpenMrsRecordSource {
    async fn resolve(&self, ctx: &ExecutionContext, patient: &PatientUuid) -> Result<Patient> {
        let url = join_segments(
            &self.base_url,
            &["ws", "fhir2", "R4", "Patient", patient.as_str()],
        );
        let response = self.get(ctx, url, FHIR_JSON_CONTENT_TYPE).await?;

        if !response.status().is_success() {
            return Err(status_error(response, patient).await.into());
        }

        let resource: Patient = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        if resource.resource_type != "Patient" {
            return Err(SourceError::InvalidResponse(format!(
                "expected a Patient resource, got {}",
                resource.resource_type
            ))
            .into());
        }

        Ok(resource)
    }

    async fn attributes_for_person(
        &self,
        ctx: &ExecutionContext,
        patient: &PatientUuid,
    ) -> Result<Vec<CustomAttribute>> {
        let mut url = join_segments(
            &self.base_url,
            &["ws", "rest", "v1", "person", patient.as_str(), "attribute"],
        );
        url.query_pairs_mut().append_pair("v", "full");

        let response = self.get(ctx, url, "application/json").await?;

        if !response.status().is_success() {
            return Err(status_error(response, patient).await.into());
        }

        let list: AttributeListResponse = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        let attributes: Vec<_> = list
            .results
            .iter()
            .filter_map(|r| match r.to_domain() {
                Ok(attribute) => Some(attribute),
                Err(e) => {
                    tracing::debug!(patient = %patient, error = %e, "Skipping person attribute");
                    None
                }
            })
            .collect();

        tracing::debug!(
            patient = %patient,
            count = attributes.len(),
            "Loaded person attributes"
        );

        Ok(attributes)
    }
}
