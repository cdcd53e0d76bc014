use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneToManyRelationshipMetadata {
    pub schema_name: String,

    #[serde(default)]
    pub referencing_entity: Option<String>,

    #[serde(default)]
    pub referencing_attribute: Option<String>,

    #[serde(default)]
    pub referenced_entity: Option<String>,

    #[serde(default)]
    pub referenced_attribute: Option<String>,

    #[serde(default)]
    pub is_custom_relationship: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManyToManyRelationshipMetadata {
    pub schema_name: String,

    #[serde(default)]
    pub entity1_logical_name: Option<String>,

    #[serde(default)]
    pub entity2_logical_name: Option<String>,

    #[serde(default)]
    pub intersect_entity_name: Option<String>,

    #[serde(default)]
    pub is_custom_relationship: Option<bool>,
}
