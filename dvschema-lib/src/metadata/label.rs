use serde::Deserialize;

/// A localizable label as returned by the platform.
///
/// Only the label in the caller's language (`UserLocalizedLabel`) is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    #[serde(default)]
    pub user_localized_label: Option<LocalizedLabel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedLabel {
    #[serde(default)]
    pub label: Option<String>,
}

impl Label {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.user_localized_label.as_ref()?.label.as_deref()
    }
}

/// Extract the user-localized text from an optional label.
#[must_use]
pub fn label_text(label: Option<&Label>) -> Option<String> {
    label.and_then(Label::text).map(str::to_string)
}

/// A managed property wrapper (`{"Value": ..., "CanBeChanged": ...}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedProperty<T> {
    #[serde(default)]
    pub value: Option<T>,
}
