use super::{EntityRecord, RelationshipRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root of an extracted schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaDocument {
    /// When the extraction ran
    pub extracted_date: DateTime<Utc>,

    /// URL of the environment the metadata came from
    pub environment_url: String,

    /// Friendly name of the organization
    pub organization_name: String,

    /// Unique name of the solution used to scope the extraction, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_name: Option<String>,

    /// Entity logical names resolved from the solution, present only when a solution filter was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_components: Option<Vec<String>>,

    /// Entities, ordered by logical name
    #[serde(default)]
    pub entities: Vec<EntityRecord>,

    /// Relationships across the whole environment, independent of any solution filter
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

impl SchemaDocument {
    /// Total number of attributes across all entities.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.entities.iter().map(|e| e.attributes.len()).sum()
    }

    /// Number of attributes that carry an option set.
    #[must_use]
    pub fn option_set_count(&self) -> usize {
        self.entities
            .iter()
            .flat_map(|e| &e.attributes)
            .filter(|a| a.option_set.is_some())
            .count()
    }

    /// Look up an entity by logical name.
    #[must_use]
    pub fn entity(&self, logical_name: &str) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.logical_name == logical_name)
    }
}
