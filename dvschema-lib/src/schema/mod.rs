//! The normalized schema document produced by an extraction run
//!
//! Everything in this module is a plain record: the extraction pipeline builds
//! a [`SchemaDocument`] exactly once and hands it, read-only, to the report
//! generators. The JSON encoding of these records is the tool's primary output
//! format, so field names and absence semantics are part of the contract:
//!
//! - Field names are serialized in PascalCase (`LogicalName`, `MaxLength`, ...).
//! - Optional fields that are not populated are omitted entirely rather than
//!   being written as `null` or a zero value. A missing `MinValue` means the
//!   attribute has no numeric bound, which is different from a bound of `0`.

mod attribute_record;
mod entity_record;
mod option_set_record;
mod relationship_record;
mod schema_document;

pub use attribute_record::AttributeRecord;
pub use entity_record::EntityRecord;
pub use option_set_record::{OptionRecord, OptionSetRecord};
pub use relationship_record::{RelationshipKind, RelationshipRecord};
pub use schema_document::SchemaDocument;
