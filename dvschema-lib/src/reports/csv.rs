use super::common::{format_optional, join_targets, yes_no};
use crate::Result;
use crate::schema::SchemaDocument;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

const HEADER: [&str; 10] = [
    "Entity",
    "Attribute",
    "Display Name",
    "Type",
    "Description",
    "Required Level",
    "Is Custom",
    "Max Length",
    "Format",
    "Targets",
];

/// Write one row per attribute of every entity.
///
/// Every field is quoted; embedded quotes are doubled.
pub fn generate<W: Write>(document: &SchemaDocument, writer: &mut W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().quote_style(QuoteStyle::Always).from_writer(writer);

    csv_writer.write_record(HEADER)?;

    for entity in &document.entities {
        for attr in &entity.attributes {
            let max_length = format_optional(attr.max_length);
            let targets = join_targets(attr.targets.as_deref(), "; ");
            csv_writer.write_record([
                entity.logical_name.as_str(),
                attr.logical_name.as_str(),
                attr.display_name.as_deref().unwrap_or_default(),
                attr.attribute_type.as_deref().unwrap_or_default(),
                attr.description.as_deref().unwrap_or_default(),
                attr.required_level.as_deref().unwrap_or_default(),
                yes_no(attr.is_custom_attribute),
                max_length.as_str(),
                attr.format.as_deref().unwrap_or_default(),
                targets.as_str(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
