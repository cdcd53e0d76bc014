use crate::metadata::{AttributeMetadata, AttributeVariant, OptionSetMetadata, label_text};
use crate::schema::{OptionRecord, OptionSetRecord};

/// Extract the enumerated value set carried by an attribute, if any.
///
/// Picklist, state and status attributes all normalize to the same shape.
/// State and status option sets are always reported as local.
#[must_use]
pub fn extract_option_set(attribute: &AttributeMetadata) -> Option<OptionSetRecord> {
    match &attribute.variant {
        AttributeVariant::Picklist { option_set } => option_set
            .as_ref()
            .map(|os| normalize_option_set(os, os.is_global.unwrap_or(false))),
        AttributeVariant::State { option_set } | AttributeVariant::Status { option_set } => {
            option_set.as_ref().map(|os| normalize_option_set(os, false))
        }
        _ => None,
    }
}

fn normalize_option_set(option_set: &OptionSetMetadata, is_global: bool) -> OptionSetRecord {
    let mut options: Vec<_> = option_set
        .options
        .iter()
        .map(|opt| OptionRecord {
            value: opt.value.unwrap_or(0),
            label: label_text(opt.label.as_ref()),
        })
        .collect();

    options.sort_by_key(|opt| opt.value);

    OptionSetRecord {
        name: option_set.name.clone(),
        is_global,
        options,
    }
}
