use super::Label;
use serde::Deserialize;

/// Option set payload shared by picklist, state and status attributes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionSetMetadata {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub is_global: Option<bool>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub options: Vec<OptionMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionMetadata {
    #[serde(default)]
    pub value: Option<i32>,

    #[serde(default)]
    pub label: Option<Label>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_options_are_empty() {
        let option_set: OptionSetMetadata = serde_json::from_value(json!({
            "Name": "contact_gendercode",
            "Options": null
        }))
        .unwrap();

        assert_eq!(option_set.name.as_deref(), Some("contact_gendercode"));
        assert!(option_set.options.is_empty());
    }

    #[test]
    fn test_missing_options_are_empty() {
        let option_set: OptionSetMetadata = serde_json::from_value(json!({"IsGlobal": true})).unwrap();
        assert_eq!(option_set.is_global, Some(true));
        assert!(option_set.options.is_empty());
    }
}
