#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for dvschema
//!
//! This library consolidates all functionality for the dvschema tool, which
//! extracts entity, attribute, option set and relationship metadata from a
//! Dataverse environment into a portable schema document.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`metadata`]: Wire model of the platform metadata and the Web API client
//! - [`extraction`]: Normalization, solution scoping and the extraction pipeline
//! - [`schema`]: The normalized schema document model
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod extraction;
pub mod metadata;
pub mod reports;
pub mod schema;

pub use crate::commands::{Host, run};
