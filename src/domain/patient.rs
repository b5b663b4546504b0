//! FHIR R4 Patient models
//!
//! These models are not complete representations of the FHIR specification.
//! They type the elements the sync pipeline rewrites (`id`, `identifier`,
//! `name`, `telecom`, `extension`) and carry every other element through
//! untouched in a flattened JSON map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// [NameUse](<https://hl7.org/fhir/R4/valueset-name-use.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameUse {
    Usual,
    Official,
    Temp,
    Nickname,
    Anonymous,
    Old,
    Maiden,
}

/// [ContactPointSystem](<https://hl7.org/fhir/R4/valueset-contact-point-system.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointSystem {
    Phone,
    Fax,
    Email,
    Pager,
    Url,
    Sms,
    Other,
}

/// [ContactPointUse](<https://hl7.org/fhir/R4/valueset-contact-point-use.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointUse {
    Home,
    Work,
    Temp,
    Old,
    Mobile,
}

/// [IdentifierUse](<https://hl7.org/fhir/R4/valueset-identifier-use.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

/// [HumanName](<https://hl7.org/fhir/R4/datatypes.html#HumanName>)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<NameUse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// [ContactPoint](<https://hl7.org/fhir/R4/datatypes.html#ContactPoint>)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<ContactPointSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<ContactPointUse>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// [Identifier](<https://hl7.org/fhir/R4/datatypes.html#Identifier>)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<IdentifierUse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// [Extension](<https://hl7.org/fhir/R4/extensibility.html#Extension>)
///
/// A field without `value_string` is still a valid extension: it records that
/// the site-specific attribute is known but has no value for this patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Extension {
    /// Creates an extension with a url and an optional string value
    pub fn new(url: impl Into<String>, value: Option<String>) -> Self {
        Self {
            url: url.into(),
            value_string: value,
            other: Map::new(),
        }
    }
}

/// [Patient](<https://hl7.org/fhir/R4/patient.html>)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn default_resource_type() -> String {
    "Patient".to_string()
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            resource_type: default_resource_type(),
            id: None,
            extension: Vec::new(),
            identifier: Vec::new(),
            name: Vec::new(),
            telecom: Vec::new(),
            other: Map::new(),
        }
    }
}

impl Patient {
    /// Returns the first name entry, adding an empty one if the patient has none
    pub fn name_first_rep(&mut self) -> &mut HumanName {
        if self.name.is_empty() {
            self.name.push(HumanName::default());
        }
        &mut self.name[0]
    }

    /// Returns identifiers whose system matches
    pub fn identifiers_with_system<'a>(
        &'a self,
        system: &'a str,
    ) -> impl Iterator<Item = &'a Identifier> + 'a {
        self.identifier
            .iter()
            .filter(move |id| id.system.as_deref() == Some(system))
    }
}
