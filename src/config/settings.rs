//! Settings consumed by the sync pipeline
//!
//! [`ClientRegistrySettings`] is handed to the transformer and enricher
//! explicitly. The mapping string is parsed once, when the settings are built.

use crate::domain::ExtensionMappingRule;

/// Identifier root and extension mapping rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRegistrySettings {
    identifier_root: String,
    extension_rules: Vec<ExtensionMappingRule>,
}

impl ClientRegistrySettings {
    /// Builds settings from the identifier root and the raw mapping string
    pub fn new(identifier_root: impl Into<String>, extension_mapping: &str) -> Self {
        Self {
            identifier_root: identifier_root.into(),
            extension_rules: ExtensionMappingRule::parse_list(extension_mapping),
        }
    }

    /// Root of every minted identifier value
    pub fn identifier_root(&self) -> &str {
        &self.identifier_root
    }

    /// Parsed mapping rules, in configuration order
    pub fn extension_rules(&self) -> &[ExtensionMappingRule] {
        &self.extension_rules
    }
}
