use super::{AttributeFilter, ExtractError, Progress, SolutionResolver, normalize_attribute};
use crate::metadata::{EntityMetadata, ManyToManyRelationshipMetadata, MetadataService, OneToManyRelationshipMetadata, label_text};
use crate::schema::{EntityRecord, RelationshipKind, RelationshipRecord, SchemaDocument};
use chrono::Utc;
use core::fmt::{Debug, Formatter};
use std::collections::{BTreeSet, HashSet};

const LOG_TARGET: &str = "   extract";

/// What to extract.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Unique name of the solution to narrow entities to. Blank means no narrowing.
    pub solution: Option<String>,

    pub attribute_filter: AttributeFilter,
}

/// Drives an extraction run against a metadata service.
pub struct Extractor<'a, S> {
    service: &'a S,
    progress: Option<&'a dyn Progress>,
    max_concurrent_lookups: usize,
}

impl<S> Debug for Extractor<'_, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Extractor")
            .field("has_progress", &self.progress.is_some())
            .field("max_concurrent_lookups", &self.max_concurrent_lookups)
            .finish_non_exhaustive()
    }
}

impl<'a, S: MetadataService> Extractor<'a, S> {
    #[must_use]
    pub const fn new(service: &'a S) -> Self {
        Self {
            service,
            progress: None,
            max_concurrent_lookups: super::DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Bound the number of concurrent per-component lookups during solution resolution.
    #[must_use]
    pub const fn with_max_concurrent_lookups(mut self, max_concurrent_lookups: usize) -> Self {
        self.max_concurrent_lookups = max_concurrent_lookups;
        self
    }

    /// Run the extraction and assemble a schema document.
    ///
    /// Entities (and the attributes within each entity) come out sorted by logical
    /// name. When a solution is given, only its entities are included, but
    /// relationships are always taken from the complete entity set.
    ///
    /// # Errors
    ///
    /// Fails if the bulk metadata retrieval fails, if the solution cannot be
    /// resolved, or if the retrieved entities have empty or duplicate logical names.
    pub async fn extract(&self, options: &ExtractOptions) -> Result<SchemaDocument, ExtractError> {
        let solution = options.solution.as_deref().map(str::trim).filter(|s| !s.is_empty());

        self.set_phase("Retrieving");
        let universe = self.service.retrieve_all_entities().await.map_err(ExtractError::Metadata)?;
        log::info!(target: LOG_TARGET, "retrieved metadata for {} entities", universe.len());

        check_logical_names(&universe)?;

        let solution_components = match solution {
            Some(unique_name) => {
                self.set_phase("Resolving");
                let names = SolutionResolver::new(self.service)
                    .with_max_concurrent_lookups(self.max_concurrent_lookups)
                    .resolve(unique_name)
                    .await?;
                Some(names)
            }
            None => None,
        };

        let selected = select_entities(&universe, solution_components.as_ref());
        if let Some(unique_name) = solution {
            log::info!(
                target: LOG_TARGET,
                "{} of {} entities belong to solution '{unique_name}'",
                selected.len(),
                universe.len()
            );
        }

        log::debug!(
            target: LOG_TARGET,
            "attribute prefix {:?}, {} excluded attribute name(s)",
            options.attribute_filter.prefix(),
            options.attribute_filter.exclusions().len()
        );

        self.set_phase("Extracting");
        let total = selected.len();
        let entities = selected
            .iter()
            .enumerate()
            .map(|(index, entity)| {
                let record = build_entity(entity, &options.attribute_filter);
                if let Some(progress) = self.progress {
                    progress.entity_processed(index + 1, total, &entity.logical_name);
                }
                record
            })
            .collect();

        let relationships = collect_relationships(&universe);
        log::info!(target: LOG_TARGET, "extracted {} relationships", relationships.len());

        if let Some(progress) = self.progress {
            progress.done();
        }

        let environment = self.service.environment();
        Ok(SchemaDocument {
            extracted_date: Utc::now(),
            environment_url: environment.url.clone(),
            organization_name: environment.organization_name.clone(),
            solution_name: solution.map(str::to_string),
            solution_components: solution_components.map(|names| names.into_iter().collect()),
            entities,
            relationships,
        })
    }

    fn set_phase(&self, phase: &str) {
        if let Some(progress) = self.progress {
            progress.set_phase(phase);
        }
    }
}

fn check_logical_names(universe: &[EntityMetadata]) -> Result<(), ExtractError> {
    let mut seen = HashSet::with_capacity(universe.len());
    for entity in universe {
        if entity.logical_name.is_empty() {
            return Err(ExtractError::InvalidEntity(format!(
                "entity '{}' has an empty logical name",
                entity.schema_name
            )));
        }

        if !seen.insert(entity.logical_name.as_str()) {
            return Err(ExtractError::InvalidEntity(format!(
                "logical name '{}' is reported more than once",
                entity.logical_name
            )));
        }
    }

    Ok(())
}

/// The entities to normalize, in logical-name order.
fn select_entities<'u>(universe: &'u [EntityMetadata], solution_components: Option<&BTreeSet<String>>) -> Vec<&'u EntityMetadata> {
    let mut selected: Vec<_> = universe
        .iter()
        .filter(|entity| solution_components.is_none_or(|names| names.contains(&entity.logical_name)))
        .collect();

    selected.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));
    selected
}

fn build_entity(entity: &EntityMetadata, filter: &AttributeFilter) -> EntityRecord {
    let mut attributes: Vec<_> = entity
        .attributes
        .iter()
        .filter(|attr| filter.accepts(&attr.logical_name))
        .collect();

    attributes.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));

    log::debug!(
        target: LOG_TARGET,
        "entity '{}': kept {} of {} attributes",
        entity.logical_name,
        attributes.len(),
        entity.attributes.len()
    );

    EntityRecord {
        logical_name: entity.logical_name.clone(),
        schema_name: entity.schema_name.clone(),
        display_name: label_text(entity.display_name.as_ref()),
        description: label_text(entity.description.as_ref()),
        primary_id_attribute: entity.primary_id_attribute.clone(),
        primary_name_attribute: entity.primary_name_attribute.clone(),
        entity_set_name: entity.entity_set_name.clone(),
        is_custom_entity: entity.is_custom_entity.unwrap_or(false),
        is_activity: entity.is_activity.unwrap_or(false),
        ownership_type: entity.ownership_type.clone(),
        attributes: attributes.into_iter().map(normalize_attribute).collect(),
    }
}

/// Relationships of every entity, visited in logical-name order.
///
/// A many-to-many relationship is reported by both of its entities; only its
/// first occurrence is kept.
fn collect_relationships(universe: &[EntityMetadata]) -> Vec<RelationshipRecord> {
    let mut entities: Vec<_> = universe.iter().collect();
    entities.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));

    let mut seen = HashSet::new();
    let mut relationships = Vec::new();

    for entity in entities {
        let records = entity
            .one_to_many_relationships
            .iter()
            .map(one_to_many_record)
            .chain(entity.many_to_many_relationships.iter().map(many_to_many_record));

        for record in records {
            if seen.insert(record.schema_name.clone()) {
                relationships.push(record);
            }
        }
    }

    relationships
}

fn one_to_many_record(rel: &OneToManyRelationshipMetadata) -> RelationshipRecord {
    RelationshipRecord {
        schema_name: rel.schema_name.clone(),
        kind: RelationshipKind::OneToMany {
            referencing_entity: rel.referencing_entity.clone(),
            referencing_attribute: rel.referencing_attribute.clone(),
            referenced_entity: rel.referenced_entity.clone(),
            referenced_attribute: rel.referenced_attribute.clone(),
        },
        is_custom_relationship: rel.is_custom_relationship.unwrap_or(false),
    }
}

fn many_to_many_record(rel: &ManyToManyRelationshipMetadata) -> RelationshipRecord {
    RelationshipRecord {
        schema_name: rel.schema_name.clone(),
        kind: RelationshipKind::ManyToMany {
            entity1_logical_name: rel.entity1_logical_name.clone(),
            entity2_logical_name: rel.entity2_logical_name.clone(),
            intersect_entity_name: rel.intersect_entity_name.clone(),
        },
        is_custom_relationship: rel.is_custom_relationship.unwrap_or(false),
    }
}
