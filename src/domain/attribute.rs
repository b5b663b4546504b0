//! Person attributes and the rules that map them to FHIR extensions

use super::ids::AttributeTypeId;
use serde::{Deserialize, Serialize};

/// A custom key/value attribute on a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub attribute_type: AttributeTypeId,
    pub value: String,
    #[serde(default)]
    pub voided: bool,
}

impl CustomAttribute {
    /// Creates an active attribute
    pub fn new(attribute_type: AttributeTypeId, value: impl Into<String>) -> Self {
        Self {
            attribute_type,
            value: value.into(),
            voided: false,
        }
    }

    /// Active attributes are the ones that have not been voided
    pub fn is_active(&self) -> bool {
        !self.voided
    }
}

/// Maps one attribute type to the url of the extension that carries it
///
/// The type id is kept as written. A blank one matches no attribute, so its
/// extension is always emitted without a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMappingRule {
    pub attribute_type: String,
    pub extension_url: String,
}

impl ExtensionMappingRule {
    /// Whether an attribute is of this rule's type
    pub fn matches(&self, attribute: &CustomAttribute) -> bool {
        attribute.attribute_type.as_str() == self.attribute_type
    }
}

impl ExtensionMappingRule {
    /// Parses a comma-separated list of `attributeTypeId|extensionUrl` pairs
    ///
    /// Pairs and their segments are trimmed. A pair that does not split into
    /// exactly two segments is skipped, as is one with a blank url. A blank
    /// type id is kept.
    /// Rules keep the order they were written in.
    ///
    /// # Examples
    ///
    /// ```
    /// use crsync::domain::ExtensionMappingRule;
    ///
    /// let rules = ExtensionMappingRule::parse_list("t1|http://a, bad, t2|http://b");
    /// assert_eq!(rules.len(), 2);
    /// assert_eq!(rules[1].extension_url, "http://b");
    /// ```
    pub fn parse_list(mapping: &str) -> Vec<Self> {
        mapping
            .split(',')
            .filter_map(|pair| {
                let segments: Vec<&str> = pair.trim().split('|').collect();
                match segments.as_slice() {
                    [type_id, url] if !url.trim().is_empty() => Some(Self {
                        attribute_type: type_id.trim().to_string(),
                        extension_url: url.trim().to_string(),
                    }),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_two_pairs_in_order() {
        let rules = ExtensionMappingRule::parse_list("t1|ext1,t2|ext2");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].attribute_type, "t1");
        assert_eq!(rules[0].extension_url, "ext1");
        assert_eq!(rules[1].attribute_type, "t2");
        assert_eq!(rules[1].extension_url, "ext2");
    }

    #[test]
    fn test_parse_trims_pairs_and_segments() {
        let rules = ExtensionMappingRule::parse_list("  t1 | http://x/a ,\n t2|http://x/b ");
        assert_eq!(rules[0].attribute_type, "t1");
        assert_eq!(rules[0].extension_url, "http://x/a");
        assert_eq!(rules[1].extension_url, "http://x/b");
    }

    #[test_case("" ; "empty string")]
    #[test_case("   " ; "whitespace only")]
    #[test_case("onlyonesegment" ; "single segment")]
    #[test_case("a|b|c" ; "three segments")]
    #[test_case(",,," ; "empty pairs")]
    #[test_case("t1|" ; "missing url")]
    fn test_parse_yields_no_rules(mapping: &str) {
        assert!(ExtensionMappingRule::parse_list(mapping).is_empty());
    }

    #[test]
    fn test_blank_type_id_keeps_the_pair() {
        let rules = ExtensionMappingRule::parse_list("t1|ext1, |http://x");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].attribute_type, "");
        assert_eq!(rules[1].extension_url, "http://x");
    }

    #[test]
    fn test_blank_type_id_matches_nothing() {
        let rule = &ExtensionMappingRule::parse_list("|http://x")[0];
        let attribute = CustomAttribute::new(AttributeTypeId::new("t1").unwrap(), "X");
        assert!(!rule.matches(&attribute));
    }

    #[test]
    fn test_malformed_pairs_are_skipped() {
        let rules = ExtensionMappingRule::parse_list("t1|ext1,a|b|c,onlyonesegment,t2|ext2");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].attribute_type, "t2");
    }

    #[test]
    fn test_attribute_active_flag() {
        let mut attribute = CustomAttribute::new(AttributeTypeId::new("t1").unwrap(), "X");
        assert!(attribute.is_active());
        attribute.voided = true;
        assert!(!attribute.is_active());
    }
}
