//! Domain identifier types with validation
//!
//! Newtype wrappers keep patient uuids and person attribute type ids from being
//! mixed up with each other or with arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient identifier newtype wrapper
///
/// The uuid of a patient in the source system. It is the only piece of data a
/// notification carries and the key every lookup is made with.
///
/// # Examples
///
/// ```
/// use crsync::domain::ids::PatientUuid;
/// use std::str::FromStr;
///
/// let uuid = PatientUuid::from_str("5946f880-b197-400b-9caa-a3c661d23041").unwrap();
/// assert_eq!(uuid.as_str(), "5946f880-b197-400b-9caa-a3c661d23041");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientUuid(String);

impl PatientUuid {
    /// Creates a new PatientUuid from a string
    ///
    /// # Arguments
    ///
    /// * `uuid` - The patient identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(PatientUuid)` if the value is not blank, `Err` otherwise
    pub fn new(uuid: impl Into<String>) -> Result<Self, String> {
        let uuid = uuid.into();
        if uuid.trim().is_empty() {
            return Err("Patient uuid cannot be blank".to_string());
        }
        Ok(Self(uuid))
    }

    /// Returns the uuid as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientUuid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Person attribute type identifier
///
/// Names the kind of a custom person attribute (for example "Telephone
/// Number" or "Mother's Name") by the uuid of its attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeTypeId(String);

impl AttributeTypeId {
    /// Creates a new AttributeTypeId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Attribute type id cannot be blank".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the attribute type id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttributeTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for AttributeTypeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_uuid_valid() {
        let uuid = PatientUuid::new("p-123").unwrap();
        assert_eq!(uuid.as_str(), "p-123");
        assert_eq!(uuid.to_string(), "p-123");
    }

    #[test]
    fn test_patient_uuid_blank_rejected() {
        assert!(PatientUuid::new("").is_err());
        assert!(PatientUuid::new("   ").is_err());
        assert!(PatientUuid::from_str("\t\n").is_err());
    }

    #[test]
    fn test_patient_uuid_into_inner() {
        let uuid = PatientUuid::new("p-123").unwrap();
        assert_eq!(uuid.into_inner(), "p-123".to_string());
    }

    #[test]
    fn test_attribute_type_id_compares_with_str() {
        let id = AttributeTypeId::new("8d8718c2-c2cc-11de-8d13-0010c6dffd0f").unwrap();
        assert!(id == *"8d8718c2-c2cc-11de-8d13-0010c6dffd0f");
        assert!(id != *"other");
    }

    #[test]
    fn test_attribute_type_id_blank_rejected() {
        assert!(AttributeTypeId::new(" ").is_err());
    }

    #[test]
    fn test_patient_uuid_serialization() {
        let uuid = PatientUuid::new("p-123").unwrap();
        let json = serde_json::to_string(&uuid).unwrap();
        assert_eq!(json, "\"p-123\"");
        let back: PatientUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uuid);
    }
}
