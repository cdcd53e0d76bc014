use super::{Label, ManagedProperty, OptionSetMetadata};
use serde::Deserialize;

/// An attribute as returned by the platform.
///
/// The fields common to every attribute live here; the fields that only some
/// attribute types define are carried by [`AttributeVariant`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeMetadata {
    pub logical_name: String,

    #[serde(default)]
    pub schema_name: String,

    #[serde(default)]
    pub display_name: Option<Label>,

    #[serde(default)]
    pub description: Option<Label>,

    #[serde(default)]
    pub attribute_type: Option<String>,

    #[serde(default)]
    pub is_custom_attribute: Option<bool>,

    #[serde(default)]
    pub is_primary_id: Option<bool>,

    #[serde(default)]
    pub is_primary_name: Option<bool>,

    #[serde(default)]
    pub is_valid_for_create: Option<bool>,

    #[serde(default)]
    pub is_valid_for_update: Option<bool>,

    #[serde(default)]
    pub is_valid_for_read: Option<bool>,

    #[serde(default)]
    pub required_level: Option<ManagedProperty<String>>,

    #[serde(flatten)]
    pub variant: AttributeVariant,
}

/// The concrete attribute type, keyed on the OData type annotation.
///
/// Types without type-specific fields of interest (boolean, memo, uniqueidentifier,
/// virtual, ...) and any type introduced by the platform later all land in `Other`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "@odata.type")]
pub enum AttributeVariant {
    #[serde(rename = "#Microsoft.Dynamics.CRM.StringAttributeMetadata", rename_all = "PascalCase")]
    String { max_length: Option<i32>, format: Option<String> },

    #[serde(rename = "#Microsoft.Dynamics.CRM.IntegerAttributeMetadata", rename_all = "PascalCase")]
    Integer { min_value: Option<i32>, max_value: Option<i32> },

    #[serde(rename = "#Microsoft.Dynamics.CRM.DecimalAttributeMetadata", rename_all = "PascalCase")]
    Decimal {
        min_value: Option<f64>,
        max_value: Option<f64>,
        precision: Option<i32>,
    },

    #[serde(rename = "#Microsoft.Dynamics.CRM.DoubleAttributeMetadata", rename_all = "PascalCase")]
    Double { min_value: Option<f64>, max_value: Option<f64> },

    #[serde(rename = "#Microsoft.Dynamics.CRM.MoneyAttributeMetadata", rename_all = "PascalCase")]
    Money {
        min_value: Option<f64>,
        max_value: Option<f64>,
        precision: Option<i32>,
    },

    #[serde(rename = "#Microsoft.Dynamics.CRM.DateTimeAttributeMetadata", rename_all = "PascalCase")]
    DateTime { format: Option<String> },

    #[serde(rename = "#Microsoft.Dynamics.CRM.LookupAttributeMetadata", rename_all = "PascalCase")]
    Lookup { targets: Option<Vec<String>> },

    #[serde(rename = "#Microsoft.Dynamics.CRM.PicklistAttributeMetadata", rename_all = "PascalCase")]
    Picklist { option_set: Option<OptionSetMetadata> },

    #[serde(rename = "#Microsoft.Dynamics.CRM.StateAttributeMetadata", rename_all = "PascalCase")]
    State { option_set: Option<OptionSetMetadata> },

    #[serde(rename = "#Microsoft.Dynamics.CRM.StatusAttributeMetadata", rename_all = "PascalCase")]
    Status { option_set: Option<OptionSetMetadata> },

    #[serde(other)]
    Other,
}
