use super::AttributeRecord;
use serde::{Deserialize, Serialize};

/// One entity (table) and the attributes selected for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityRecord {
    pub logical_name: String,
    pub schema_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_id_attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_name_attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_set_name: Option<String>,

    #[serde(default)]
    pub is_custom_entity: bool,

    #[serde(default)]
    pub is_activity: bool,

    /// Ownership label as reported by the platform (`UserOwned`, `OrganizationOwned`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_type: Option<String>,

    /// Attributes, ordered by logical name
    #[serde(default)]
    pub attributes: Vec<AttributeRecord>,
}

impl EntityRecord {
    /// Look up an attribute by logical name.
    #[must_use]
    pub fn attribute(&self, logical_name: &str) -> Option<&AttributeRecord> {
        self.attributes.iter().find(|a| a.logical_name == logical_name)
    }
}
