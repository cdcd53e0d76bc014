use serde::{Deserialize, Serialize};

/// A named structural link between entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelationshipRecord {
    pub schema_name: String,

    #[serde(flatten)]
    pub kind: RelationshipKind,

    #[serde(default)]
    pub is_custom_relationship: bool,
}

/// The two relationship shapes. Their field sets never mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "RelationshipType")]
pub enum RelationshipKind {
    #[serde(rename_all = "PascalCase")]
    OneToMany {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        referencing_entity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        referencing_attribute: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        referenced_entity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        referenced_attribute: Option<String>,
    },

    #[serde(rename_all = "PascalCase")]
    ManyToMany {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entity1_logical_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entity2_logical_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intersect_entity_name: Option<String>,
    },
}
