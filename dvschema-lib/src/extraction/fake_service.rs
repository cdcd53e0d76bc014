//! In-memory metadata service for exercising the extraction pipeline.

use crate::Result;
use crate::metadata::{EntityMetadata, Environment, MetadataService, Query, QueryValue, Row};
use ohno::app_err;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

const FORM_COMPONENT_TYPE: i64 = 60;

#[derive(Debug)]
struct FakeSolution {
    unique_name: String,
    id: Uuid,
    components: Vec<(Uuid, i64)>,
}

#[derive(Debug)]
pub struct FakeService {
    environment: Environment,
    entities: Vec<EntityMetadata>,
    solutions: Vec<FakeSolution>,
    failing_lookups: HashSet<Uuid>,
    fail_bulk: bool,
    fail_queries: bool,
    queries: Mutex<Vec<Query>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            environment: Environment {
                url: "https://contoso.crm.dynamics.com/".to_string(),
                organization_name: "Contoso".to_string(),
            },
            entities: Vec::new(),
            solutions: Vec::new(),
            failing_lookups: HashSet::new(),
            fail_bulk: false,
            fail_queries: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Add an entity with the given raw attributes.
    pub fn with_entity(self, logical_name: &str, attributes: &[Value]) -> Self {
        self.with_entity_value(json!({
            "LogicalName": logical_name,
            "SchemaName": logical_name,
            "Attributes": attributes,
        }))
    }

    /// Add an entity from its raw representation. A metadata id is assigned if missing.
    pub fn with_entity_value(mut self, value: Value) -> Self {
        let mut entity: EntityMetadata = serde_json::from_value(value).unwrap();
        if entity.metadata_id.is_none() {
            entity.metadata_id = Some(Uuid::new_v4());
        }
        self.entities.push(entity);
        self
    }

    /// Add a solution whose entity components are the named entities, plus one form component.
    ///
    /// Names that do not match an entity get an object id that no lookup can resolve.
    pub fn with_solution(mut self, unique_name: &str, entity_names: &[&str]) -> Self {
        let mut components: Vec<_> = entity_names
            .iter()
            .map(|name| (self.entity_id(name).unwrap_or_else(Uuid::new_v4), crate::extraction::ENTITY_COMPONENT_TYPE))
            .collect();
        components.push((Uuid::new_v4(), FORM_COMPONENT_TYPE));

        self.solutions.push(FakeSolution {
            unique_name: unique_name.to_string(),
            id: Uuid::new_v4(),
            components,
        });
        self
    }

    pub fn with_failing_lookup(mut self, logical_name: &str) -> Self {
        let id = self.entity_id(logical_name).unwrap();
        let _ = self.failing_lookups.insert(id);
        self
    }

    pub const fn with_failing_bulk(mut self) -> Self {
        self.fail_bulk = true;
        self
    }

    pub const fn with_failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Every query issued so far, in order.
    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }

    fn entity_id(&self, logical_name: &str) -> Option<Uuid> {
        self.entities
            .iter()
            .find(|e| e.logical_name == logical_name)
            .and_then(|e| e.metadata_id)
    }

    fn solution_rows(&self, query: &Query) -> Result<Vec<Row>> {
        let Some(QueryValue::Text(name)) = query.condition("uniquename") else {
            return Err(app_err!("solutions query without a unique name filter"));
        };

        Ok(self
            .solutions
            .iter()
            .filter(|s| &s.unique_name == name)
            .map(|s| row(json!({"solutionid": s.id.to_string()})))
            .collect())
    }

    fn component_rows(&self, query: &Query) -> Result<Vec<Row>> {
        let Some(QueryValue::Guid(solution_id)) = query.condition("_solutionid_value") else {
            return Err(app_err!("component query without a solution filter"));
        };
        let component_type = match query.condition("componenttype") {
            Some(QueryValue::Integer(t)) => Some(*t),
            _ => None,
        };

        Ok(self
            .solutions
            .iter()
            .filter(|s| s.id == *solution_id)
            .flat_map(|s| s.components.iter())
            .filter(|(_, t)| component_type.is_none_or(|wanted| wanted == *t))
            .map(|(object_id, t)| row(json!({"objectid": object_id.to_string(), "componenttype": t})))
            .collect())
    }
}

fn row(value: Value) -> Row {
    let Value::Object(map) = value else {
        unreachable!("rows are built from JSON objects")
    };
    Row::from(map)
}

impl MetadataService for FakeService {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn retrieve_all_entities(&self) -> Result<Vec<EntityMetadata>> {
        if self.fail_bulk {
            return Err(app_err!("the metadata service is unavailable"));
        }
        Ok(self.entities.clone())
    }

    async fn retrieve_multiple(&self, query: &Query) -> Result<Vec<Row>> {
        self.queries.lock().unwrap().push(query.clone());

        if self.fail_queries {
            return Err(app_err!("query on '{}' failed", query.table()));
        }

        match query.table() {
            "solutions" => self.solution_rows(query),
            "solutioncomponents" => self.component_rows(query),
            other => Err(app_err!("unknown table '{other}'")),
        }
    }

    async fn retrieve_entity(&self, metadata_id: Uuid) -> Result<EntityMetadata> {
        if self.failing_lookups.contains(&metadata_id) {
            return Err(app_err!("lookup of entity {metadata_id} failed"));
        }

        let mut entity = self
            .entities
            .iter()
            .find(|e| e.metadata_id == Some(metadata_id))
            .cloned()
            .ok_or_else(|| app_err!("entity {metadata_id} does not exist"))?;

        entity.attributes.clear();
        entity.one_to_many_relationships.clear();
        entity.many_to_many_relationships.clear();

        Ok(entity)
    }
}
