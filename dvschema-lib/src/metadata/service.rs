use super::{EntityMetadata, Query, Row};
use crate::Result;
use uuid::Uuid;

/// Identity of the environment a service is connected to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Environment URL (e.g. `https://contoso.crm.dynamics.com/`)
    pub url: String,

    /// Friendly name of the organization
    pub organization_name: String,
}

/// The remote metadata capabilities the extraction pipeline depends on.
///
/// Each call completes (or fails) before the caller continues. Implementations
/// must tolerate concurrent calls through a shared reference.
pub trait MetadataService: Send + Sync {
    /// The environment this service is connected to.
    fn environment(&self) -> &Environment;

    /// Retrieve every entity definition with its attributes and relationships,
    /// including customizations that have not been published yet.
    fn retrieve_all_entities(&self) -> impl Future<Output = Result<Vec<EntityMetadata>>> + Send;

    /// Run a tabular query and return all matching rows.
    fn retrieve_multiple(&self, query: &Query) -> impl Future<Output = Result<Vec<Row>>> + Send;

    /// Retrieve the identifying properties of a single entity definition by its
    /// metadata identifier. Attributes and relationships are not included.
    fn retrieve_entity(&self, metadata_id: Uuid) -> impl Future<Output = Result<EntityMetadata>> + Send;
}
