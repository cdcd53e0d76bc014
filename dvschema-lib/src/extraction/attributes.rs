use super::extract_option_set;
use crate::metadata::{AttributeMetadata, AttributeVariant, label_text};
use crate::schema::AttributeRecord;

/// Flatten one platform attribute into a uniform [`AttributeRecord`].
///
/// Fields that only some attribute types define are populated when, and only
/// when, the attribute's concrete type defines them. Attribute types that carry
/// no such fields produce a record with all of them absent.
#[must_use]
pub fn normalize_attribute(attribute: &AttributeMetadata) -> AttributeRecord {
    let mut record = AttributeRecord {
        logical_name: attribute.logical_name.clone(),
        schema_name: attribute.schema_name.clone(),
        display_name: label_text(attribute.display_name.as_ref()),
        description: label_text(attribute.description.as_ref()),
        attribute_type: attribute.attribute_type.clone(),
        is_custom_attribute: attribute.is_custom_attribute.unwrap_or(false),
        is_primary_id: attribute.is_primary_id.unwrap_or(false),
        is_primary_name: attribute.is_primary_name.unwrap_or(false),
        is_valid_for_create: attribute.is_valid_for_create.unwrap_or(false),
        is_valid_for_update: attribute.is_valid_for_update.unwrap_or(false),
        is_valid_for_read: attribute.is_valid_for_read.unwrap_or(false),
        required_level: attribute.required_level.as_ref().and_then(|level| level.value.clone()),
        max_length: None,
        format: None,
        min_value: None,
        max_value: None,
        precision: None,
        option_set: None,
        targets: None,
    };

    match &attribute.variant {
        AttributeVariant::String { max_length, format } => {
            record.max_length = *max_length;
            record.format.clone_from(format);
        }
        AttributeVariant::DateTime { format } => {
            record.format.clone_from(format);
        }
        AttributeVariant::Integer { min_value, max_value } => {
            record.min_value = min_value.map(f64::from);
            record.max_value = max_value.map(f64::from);
        }
        AttributeVariant::Decimal {
            min_value,
            max_value,
            precision,
        }
        | AttributeVariant::Money {
            min_value,
            max_value,
            precision,
        } => {
            record.min_value = *min_value;
            record.max_value = *max_value;
            record.precision = *precision;
        }
        AttributeVariant::Double { min_value, max_value } => {
            record.min_value = *min_value;
            record.max_value = *max_value;
        }
        AttributeVariant::Lookup { targets } => {
            record.targets.clone_from(targets);
        }
        AttributeVariant::Picklist { .. } | AttributeVariant::State { .. } | AttributeVariant::Status { .. } => {
            record.option_set = extract_option_set(attribute);
        }
        AttributeVariant::Other => {}
    }

    record
}
