//! Metadata extraction and normalization
//!
//! This module turns the platform's entity metadata into a [`SchemaDocument`](crate::schema::SchemaDocument).
//!
//! # Pipeline
//!
//! 1. The complete entity universe is retrieved in one bulk call.
//! 2. If a solution is named, [`SolutionResolver`] resolves the logical names of
//!    its entities and the universe is narrowed to them.
//! 3. Each selected entity is normalized, with its attributes passed through an
//!    [`AttributeFilter`] and then [`normalize_attribute`].
//! 4. Relationships are collected from the whole universe, regardless of any
//!    solution or attribute filtering.
//!
//! # Failure Handling
//!
//! Two policies coexist. The bulk retrieval and the solution queries are strict:
//! any failure aborts the run with an [`ExtractError`]. The per-component
//! entity lookups inside [`SolutionResolver`] are tolerant: a component whose
//! lookup fails is logged and left out of the solution.

mod attribute_filter;
mod attributes;
mod error;
mod extractor;
mod option_sets;
mod progress;
mod solution;

#[cfg(test)]
pub(crate) mod fake_service;

pub use attribute_filter::AttributeFilter;
pub use attributes::normalize_attribute;
pub use error::{ExtractError, ResolutionError};
pub use extractor::{ExtractOptions, Extractor};
pub use option_sets::extract_option_set;
pub use progress::Progress;
pub use solution::{DEFAULT_MAX_CONCURRENT_LOOKUPS, ENTITY_COMPONENT_TYPE, SolutionResolver};
