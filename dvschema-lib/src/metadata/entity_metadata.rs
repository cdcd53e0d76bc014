use super::{AttributeMetadata, Label, ManyToManyRelationshipMetadata, OneToManyRelationshipMetadata};
use serde::Deserialize;
use uuid::Uuid;

/// An entity definition as returned by the platform.
///
/// `attributes` and the relationship lists are only populated when the
/// corresponding facets were requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityMetadata {
    #[serde(default)]
    pub metadata_id: Option<Uuid>,

    pub logical_name: String,

    #[serde(default)]
    pub schema_name: String,

    #[serde(default)]
    pub display_name: Option<Label>,

    #[serde(default)]
    pub description: Option<Label>,

    #[serde(default)]
    pub primary_id_attribute: Option<String>,

    #[serde(default)]
    pub primary_name_attribute: Option<String>,

    #[serde(default)]
    pub entity_set_name: Option<String>,

    #[serde(default)]
    pub is_custom_entity: Option<bool>,

    #[serde(default)]
    pub is_activity: Option<bool>,

    #[serde(default)]
    pub ownership_type: Option<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub attributes: Vec<AttributeMetadata>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub one_to_many_relationships: Vec<OneToManyRelationshipMetadata>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub many_to_many_relationships: Vec<ManyToManyRelationshipMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_without_facets() {
        let entity: EntityMetadata = serde_json::from_value(json!({
            "MetadataId": "70816501-edb9-4740-a16c-6a5efbc05d84",
            "LogicalName": "account",
            "SchemaName": "Account",
            "OwnershipType": "UserOwned",
            "IsCustomEntity": false
        }))
        .unwrap();

        assert_eq!(entity.logical_name, "account");
        assert_eq!(entity.metadata_id.map(|id| id.to_string()).as_deref(), Some("70816501-edb9-4740-a16c-6a5efbc05d84"));
        assert!(entity.attributes.is_empty());
        assert!(entity.one_to_many_relationships.is_empty());
        assert_eq!(entity.is_activity, None);
    }

    #[test]
    fn test_null_facets_are_empty() {
        let entity: EntityMetadata = serde_json::from_value(json!({
            "LogicalName": "account",
            "Attributes": null,
            "OneToManyRelationships": null,
            "ManyToManyRelationships": null
        }))
        .unwrap();

        assert!(entity.attributes.is_empty());
        assert!(entity.one_to_many_relationships.is_empty());
        assert!(entity.many_to_many_relationships.is_empty());
    }

    #[test]
    fn test_entity_requires_logical_name() {
        let result = serde_json::from_value::<EntityMetadata>(json!({"SchemaName": "Account"}));
        assert!(result.is_err());
    }
}
