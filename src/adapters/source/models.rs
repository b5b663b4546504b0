//! OpenMRS REST models
//!
//! Wire shapes of the person attribute sub-resource
//! (`/ws/rest/v1/person/{uuid}/attribute`). Kept apart from the domain types and
//! converted with [`PersonAttributeResource::to_domain`].

use crate::domain::{AttributeTypeId, CustomAttribute, SourceError};
use serde::Deserialize;
use serde_json::Value;

/// Paged list envelope returned by the REST API
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeListResponse {
    #[serde(default)]
    pub results: Vec<PersonAttributeResource>,
}

/// Reference to the attribute type of an attribute
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeTypeRef {
    pub uuid: String,
    #[serde(default)]
    pub display: Option<String>,
}

/// One person attribute
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAttributeResource {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub value: Value,
    pub attribute_type: AttributeTypeRef,
    #[serde(default)]
    pub voided: bool,
}

impl PersonAttributeResource {
    /// Convert to a domain attribute
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute type uuid is blank.
    pub fn to_domain(&self) -> Result<CustomAttribute, SourceError> {
        let attribute_type = AttributeTypeId::new(self.attribute_type.uuid.as_str()).map_err(|e| {
            SourceError::InvalidResponse(format!(
                "attribute {} has an invalid type: {e}",
                self.uuid.as_deref().unwrap_or("<unknown>")
            ))
        })?;

        Ok(CustomAttribute {
            attribute_type,
            value: stringify_value(&self.value),
            voided: self.voided,
        })
    }
}

/// Textual form of an attribute value
///
/// Attributes whose type is a concept, location or other object come back as
/// a reference; their `display` is the text a user sees.
fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(map) => match map.get("display") {
            Some(Value::String(display)) => display.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_list_deserialization() {
        let body = json!({
            "results": [
                {
                    "uuid": "a1",
                    "display": "Birthplace = Eldoret",
                    "value": "Eldoret",
                    "attributeType": {"uuid": "8d8718c2-c2cc-11de-8d13-0010c6dffd0f", "display": "Birthplace"},
                    "voided": false
                },
                {
                    "uuid": "a2",
                    "value": {"uuid": "c1", "display": "Married"},
                    "attributeType": {"uuid": "t-civil"},
                    "voided": true
                }
            ]
        });

        let response: AttributeListResponse = serde_json::from_value(body).unwrap();
        let attributes: Vec<CustomAttribute> = response
            .results
            .iter()
            .map(|r| r.to_domain().unwrap())
            .collect();

        assert_eq!(attributes[0].value, "Eldoret");
        assert!(attributes[0].is_active());
        assert_eq!(attributes[1].value, "Married");
        assert!(!attributes[1].is_active());
    }

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify_value(&json!(42)), "42");
        assert_eq!(stringify_value(&json!(true)), "true");
        assert_eq!(stringify_value(&Value::Null), "");
        assert_eq!(stringify_value(&json!({"uuid": "x"})), "{\"uuid\":\"x\"}");
    }

    #[test]
    fn test_blank_attribute_type_is_invalid() {
        let resource: PersonAttributeResource = serde_json::from_value(json!({
            "value": "x",
            "attributeType": {"uuid": ""}
        }))
        .unwrap();
        assert!(matches!(
            resource.to_domain(),
            Err(SourceError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_empty_envelope() {
        let response: AttributeListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.results.is_empty());
    }
}
