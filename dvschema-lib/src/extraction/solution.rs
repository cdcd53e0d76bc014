use super::ResolutionError;
use crate::metadata::{MetadataService, Query};
use futures_util::StreamExt;
use futures_util::future;
use futures_util::stream;
use std::collections::BTreeSet;
use uuid::Uuid;

const LOG_TARGET: &str = "  solution";

/// Solution component type code for entities.
pub const ENTITY_COMPONENT_TYPE: i64 = 1;

/// Default bound on concurrent per-component entity lookups.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Resolves a solution's unique name to the logical names of the entities it contains.
///
/// Resolution is two-staged: the solution and its entity components are found
/// with tabular queries, then each component's object identifier is looked up
/// as entity metadata. Individual lookups that fail are skipped; the rest of
/// the solution still resolves.
#[derive(Debug)]
pub struct SolutionResolver<'a, S> {
    service: &'a S,
    max_concurrent_lookups: usize,
}

impl<'a, S: MetadataService> SolutionResolver<'a, S> {
    #[must_use]
    pub const fn new(service: &'a S) -> Self {
        Self {
            service,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, max_concurrent_lookups: usize) -> Self {
        self.max_concurrent_lookups = max_concurrent_lookups.max(1);
        self
    }

    /// Resolve the entity logical names belonging to the solution named `unique_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NotFound`] if no solution has that unique name, and
    /// [`ResolutionError::Service`] if either of the two queries fails.
    pub async fn resolve(&self, unique_name: &str) -> Result<BTreeSet<String>, ResolutionError> {
        let solution_id = self.find_solution(unique_name).await?;
        let object_ids = self.entity_components(unique_name, solution_id).await?;

        log::info!(
            target: LOG_TARGET,
            "solution '{unique_name}' has {} entity component(s)",
            object_ids.len()
        );

        let names: BTreeSet<String> = stream::iter(object_ids)
            .map(|object_id| self.lookup_entity_name(object_id))
            .buffer_unordered(self.max_concurrent_lookups)
            .filter_map(future::ready)
            .collect()
            .await;

        log::info!(target: LOG_TARGET, "resolved {} entities in solution '{unique_name}'", names.len());
        Ok(names)
    }

    async fn find_solution(&self, unique_name: &str) -> Result<Uuid, ResolutionError> {
        let query = Query::new("solutions").column("solutionid").filter_eq("uniquename", unique_name);

        let rows = self
            .service
            .retrieve_multiple(&query)
            .await
            .map_err(|error| service_error(unique_name, error))?;

        let Some(first) = rows.first() else {
            return Err(ResolutionError::NotFound(unique_name.to_string()));
        };

        if rows.len() > 1 {
            log::warn!(
                target: LOG_TARGET,
                "{} solutions share the unique name '{unique_name}', using the first",
                rows.len()
            );
        }

        first
            .get_guid("solutionid")
            .ok_or_else(|| service_error(unique_name, ohno::app_err!("solution row carries no usable 'solutionid'")))
    }

    async fn entity_components(&self, unique_name: &str, solution_id: Uuid) -> Result<Vec<Uuid>, ResolutionError> {
        let query = Query::new("solutioncomponents")
            .column("objectid")
            .column("componenttype")
            .filter_eq("_solutionid_value", solution_id)
            .filter_eq("componenttype", ENTITY_COMPONENT_TYPE);

        let rows = self
            .service
            .retrieve_multiple(&query)
            .await
            .map_err(|error| service_error(unique_name, error))?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let object_id = row.get_guid("objectid");
                if object_id.is_none() {
                    log::debug!(target: LOG_TARGET, "skipping solution component without an object id");
                }
                object_id
            })
            .collect())
    }

    /// Per-component lookup. Failures are logged and yield `None`.
    async fn lookup_entity_name(&self, object_id: Uuid) -> Option<String> {
        match self.service.retrieve_entity(object_id).await {
            Ok(entity) => Some(entity.logical_name),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "skipping solution component {object_id}: {e}");
                None
            }
        }
    }
}

fn service_error(unique_name: &str, error: ohno::AppError) -> ResolutionError {
    ResolutionError::Service {
        solution: unique_name.to_string(),
        error,
    }
}
