//! Extension enrichment
//!
//! Adds one extension per configured mapping rule. The value is the first
//! active attribute of the rule's type; when the patient has none the
//! extension is still added, without a value.

use crate::adapters::source::RecordSource;
use crate::config::ClientRegistrySettings;
use crate::core::context::ExecutionContext;
use crate::domain::{CustomAttribute, Extension, ExtensionMappingRule, Patient, PatientUuid, Result};
use std::sync::Arc;

/// Builds the extensions for a set of rules from a patient's attributes
///
/// Inactive attributes are ignored. Output order follows rule order.
pub fn build_extensions(
    rules: &[ExtensionMappingRule],
    attributes: &[CustomAttribute],
) -> Vec<Extension> {
    rules
        .iter()
        .map(|rule| {
            let value = attributes
                .iter()
                .filter(|a| a.is_active())
                .find(|a| rule.matches(a))
                .map(|a| a.value.clone());
            Extension::new(rule.extension_url.clone(), value)
        })
        .collect()
}

/// Adds configured extensions to a patient representation
pub struct ExtensionEnricher {
    source: Arc<dyn RecordSource>,
    settings: Arc<ClientRegistrySettings>,
}

impl ExtensionEnricher {
    /// Create an enricher over a record source
    pub fn new(source: Arc<dyn RecordSource>, settings: Arc<ClientRegistrySettings>) -> Self {
        Self { source, settings }
    }

    /// Appends one extension per rule to the patient
    ///
    /// Attributes are fetched once per call, and only if there is at least one
    /// rule.
    ///
    /// # Errors
    ///
    /// Returns the source error if the attributes cannot be loaded.
    pub async fn enrich(
        &self,
        ctx: &ExecutionContext,
        mut resource: Patient,
        patient: &PatientUuid,
    ) -> Result<Patient> {
        let rules = self.settings.extension_rules();
        if rules.is_empty() {
            return Ok(resource);
        }

        let attributes = self.source.attributes_for_person(ctx, patient).await?;
        let extensions = build_extensions(rules, &attributes);

        tracing::debug!(
            patient = %patient,
            rules = rules.len(),
            matched = extensions.iter().filter(|e| e.value_string.is_some()).count(),
            "Enriched patient with extensions"
        );

        resource.extension.extend(extensions);
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AttributeTypeId;

    fn attribute(type_id: &str, value: &str) -> CustomAttribute {
        CustomAttribute::new(AttributeTypeId::new(type_id).unwrap(), value)
    }

    #[test]
    fn test_matched_and_unmatched_rules() {
        let rules = ExtensionMappingRule::parse_list("t1|ext1,t2|ext2");
        let extensions = build_extensions(&rules, &[attribute("t1", "X")]);

        assert_eq!(
            extensions,
            vec![
                Extension::new("ext1", Some("X".to_string())),
                Extension::new("ext2", None),
            ]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let rules = ExtensionMappingRule::parse_list("t1|ext1");
        let extensions =
            build_extensions(&rules, &[attribute("t1", "first"), attribute("t1", "second")]);
        assert_eq!(extensions[0].value_string.as_deref(), Some("first"));
    }

    #[test]
    fn test_voided_attributes_are_ignored() {
        let rules = ExtensionMappingRule::parse_list("t1|ext1");
        let mut voided = attribute("t1", "old");
        voided.voided = true;

        let extensions = build_extensions(&rules, &[voided.clone()]);
        assert_eq!(extensions[0].value_string, None);

        let extensions = build_extensions(&rules, &[voided, attribute("t1", "current")]);
        assert_eq!(extensions[0].value_string.as_deref(), Some("current"));
    }

    #[test]
    fn test_one_extension_per_rule_in_order() {
        let rules = ExtensionMappingRule::parse_list("t3|c,t1|a,t2|b");
        let extensions = build_extensions(&rules, &[attribute("t2", "B"), attribute("t3", "C")]);
        let urls: Vec<&str> = extensions.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["c", "a", "b"]);
        assert_eq!(extensions[1].value_string, None);
    }

    #[test]
    fn test_blank_type_id_rule_yields_empty_extension() {
        let rules = ExtensionMappingRule::parse_list("t1|ext1,|http://x");
        let extensions = build_extensions(&rules, &[attribute("t1", "X")]);
        assert_eq!(
            extensions,
            vec![
                Extension::new("ext1", Some("X".to_string())),
                Extension::new("http://x", None),
            ]
        );
    }

    #[test]
    fn test_no_rules_no_extensions() {
        assert!(build_extensions(&[], &[attribute("t1", "X")]).is_empty());
    }
}
