use serde::{Deserialize, Serialize};

/// An enumerated value domain attached to a picklist, state or status attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionSetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Always `false` for state and status option sets
    #[serde(default)]
    pub is_global: bool,

    /// Options, ordered by value
    #[serde(default)]
    pub options: Vec<OptionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionRecord {
    pub value: i32,

    /// `None` when the platform supplied no label, which is distinct from an empty label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
