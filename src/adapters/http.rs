//! Shared HTTP plumbing for the source and registry clients

use crate::domain::{CrSyncError, Result};
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with the given timeout and TLS settings
///
/// # Errors
///
/// Returns a configuration error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout_seconds: u64, tls_verify: bool) -> Result<Client> {
    let mut client_builder = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(timeout_seconds.min(30)));

    if !tls_verify {
        tracing::warn!("TLS certificate verification is disabled");
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    client_builder
        .build()
        .map_err(|e| CrSyncError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Value of a basic `Authorization` header
pub fn basic_auth_value(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
    format!("Basic {encoded}")
}

/// Parses a base URL, rejecting ones that cannot carry path segments
pub fn parse_base_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| CrSyncError::Configuration(format!("Invalid {field} '{value}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CrSyncError::Configuration(format!(
            "Invalid {field} '{value}': not a base URL"
        )));
    }
    Ok(url)
}

/// Appends path segments to a base URL, percent-encoding each one
///
/// A segment containing `/` stays a single segment (`a/b` becomes `a%2Fb`).
pub fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_value() {
        assert_eq!(basic_auth_value("admin", "Admin123"), "Basic YWRtaW46QWRtaW4xMjM=");
    }

    #[test]
    fn test_join_segments_handles_trailing_slash() {
        let base = parse_base_url("registry.base_url", "http://cr.example.org/fhir/").unwrap();
        let url = join_segments(&base, &["Patient"]);
        assert_eq!(url.as_str(), "http://cr.example.org/fhir/Patient");

        let base = parse_base_url("registry.base_url", "http://cr.example.org/fhir").unwrap();
        let url = join_segments(&base, &["Patient"]);
        assert_eq!(url.as_str(), "http://cr.example.org/fhir/Patient");
    }

    #[test]
    fn test_join_segments_encodes_slashes() {
        let base = parse_base_url("registry.base_url", "http://cr.example.org/fhir").unwrap();
        let url = join_segments(&base, &["Patient", "http://root/p-123"]);
        assert_eq!(
            url.as_str(),
            "http://cr.example.org/fhir/Patient/http:%2F%2Froot%2Fp-123"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_non_base() {
        assert!(parse_base_url("source.base_url", "mailto:someone@example.org").is_err());
        assert!(parse_base_url("source.base_url", "not a url").is_err());
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(30, true).is_ok());
        assert!(build_http_client(5, false).is_ok());
    }
}
