use std::collections::HashSet;

/// Decides which attributes of an entity make it into the schema document.
///
/// The prefix test and the exclusion test are applied independently: an
/// attribute is kept when it passes both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFilter {
    prefix: Option<String>,
    exclude: HashSet<String>,
}

impl AttributeFilter {
    /// Create a filter.
    ///
    /// A blank prefix is treated as no prefix; any other prefix is matched as
    /// given, surrounding whitespace included. Exclusions are matched exactly.
    #[must_use]
    pub fn new<I, S>(prefix: Option<&str>, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: prefix.filter(|p| !p.trim().is_empty()).map(str::to_string),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[must_use]
    pub const fn exclusions(&self) -> &HashSet<String> {
        &self.exclude
    }

    #[must_use]
    pub fn accepts(&self, logical_name: &str) -> bool {
        if let Some(prefix) = &self.prefix
            && !has_prefix_ignore_case(logical_name, prefix)
        {
            return false;
        }

        !self.exclude.contains(logical_name)
    }
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
