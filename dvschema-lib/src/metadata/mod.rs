//! Access to the remote metadata platform
//!
//! This module defines the shape of the metadata as the platform reports it
//! and the [`MetadataService`] trait through which the extraction pipeline
//! retrieves it. [`WebApiClient`] implements the trait over the Dataverse
//! Web API.
//!
//! # Implementation Model
//!
//! The wire types mirror the platform's loosely-typed representation: nearly
//! every field is optional, labels are wrapped in localization envelopes, and
//! attributes form a sealed hierarchy of structurally different shapes. The
//! attribute hierarchy is modeled as [`AttributeVariant`], a sum type keyed on
//! the OData type annotation, with a catch-all for types that carry nothing
//! the extractor needs.
//!
//! Transport concerns (authentication header, OData headers, retry of
//! transient failures, paging) live entirely in the client; the extraction
//! pipeline only sees the three capability calls of the trait.

mod attribute_metadata;
mod entity_metadata;
mod label;
mod option_set_metadata;
mod query;
mod relationship_metadata;
pub(crate) mod resilient_http;
mod service;
mod web_api;

pub use attribute_metadata::{AttributeMetadata, AttributeVariant};
pub use entity_metadata::EntityMetadata;
pub use label::{Label, LocalizedLabel, ManagedProperty, label_text};
pub use option_set_metadata::{OptionMetadata, OptionSetMetadata};
pub use query::{Condition, Query, QueryValue, Row};
pub use relationship_metadata::{ManyToManyRelationshipMetadata, OneToManyRelationshipMetadata};
pub use resilient_http::RetryPolicy;
pub use service::{Environment, MetadataService};
pub use web_api::{ConnectionSettings, WebApiClient};

/// The platform sends `null` for collections it did not populate; treat that
/// the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    use serde::Deserialize as _;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
