use super::OptionSetRecord;
use serde::{Deserialize, Serialize};

/// A flattened attribute (column).
///
/// The fields from `max_length` onwards are type-conditional: each one is
/// populated only when the source attribute's variant defines it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeRecord {
    pub logical_name: String,
    pub schema_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type label as reported by the platform. Not a closed set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,

    #[serde(default)]
    pub is_custom_attribute: bool,

    #[serde(default)]
    pub is_primary_id: bool,

    #[serde(default)]
    pub is_primary_name: bool,

    #[serde(default)]
    pub is_valid_for_create: bool,

    #[serde(default)]
    pub is_valid_for_update: bool,

    #[serde(default)]
    pub is_valid_for_read: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_level: Option<String>,

    /// Text variants only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,

    /// Text and date/time variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Integer, decimal, double and money variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    /// Integer, decimal, double and money variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    /// Decimal and money variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,

    /// Picklist, state and status variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_set: Option<OptionSetRecord>,

    /// Lookup variants. `None` means "not a lookup", never "a lookup to nothing".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}
