//! Common utilities shared across report generators.

use std::collections::HashSet;

/// Longest worksheet name the workbook format accepts.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const INVALID_SHEET_NAME_CHARS: [char; 7] = [':', '/', '\\', '?', '*', '[', ']'];

/// Render a flag the way tabular outputs show it.
pub const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Join the target entities of a lookup, or produce an empty string for non-lookups.
pub fn join_targets(targets: Option<&[String]>, separator: &str) -> String {
    targets.map(|t| t.join(separator)).unwrap_or_default()
}

/// Format an optional numeric cell value as text.
pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Make a string usable as a worksheet name.
///
/// Truncates to [`MAX_SHEET_NAME_CHARS`] characters and replaces characters the
/// format forbids (plus leading or trailing apostrophes) with `_`.
pub fn sanitize_sheet_name(name: &str) -> String {
    let mut chars: Vec<char> = name
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .map(|c| if INVALID_SHEET_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect();

    if chars.first() == Some(&'\'') {
        chars[0] = '_';
    }
    if let Some(last) = chars.last_mut()
        && *last == '\''
    {
        *last = '_';
    }

    if chars.is_empty() {
        return "_".to_string();
    }

    chars.into_iter().collect()
}

/// Hands out worksheet names that are valid and unique within one workbook.
///
/// Names are compared case-insensitively, the way the workbook format does.
/// A clash is resolved by appending `_2`, `_3`, ... within the length limit.
#[derive(Debug, Default)]
pub struct SheetNamer {
    taken: HashSet<String>,
}

impl SheetNamer {
    /// Create a namer with some names already in use.
    pub fn with_reserved<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: reserved.into_iter().map(str::to_lowercase).collect(),
        }
    }

    pub fn assign(&mut self, name: &str) -> String {
        let base = sanitize_sheet_name(name);
        if self.taken.insert(base.to_lowercase()) {
            return base;
        }

        let mut n = 2_u32;
        loop {
            let suffix = format!("_{n}");
            let stem: String = base.chars().take(MAX_SHEET_NAME_CHARS - suffix.len()).collect();
            let candidate = format!("{stem}{suffix}");
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }

    #[test]
    fn test_join_targets() {
        let targets = vec!["account".to_string(), "contact".to_string()];
        assert_eq!(join_targets(Some(&targets), "; "), "account; contact");
        assert_eq!(join_targets(None, "; "), "");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(160)), "160");
        assert_eq!(format_optional(Some(-90.5)), "-90.5");
        assert_eq!(format_optional::<i32>(None), "");
    }

    #[test]
    fn test_sanitize_replaces_invalid_chars() {
        assert_eq!(sanitize_sheet_name("a:b/c\\d?e*f[g]"), "a_b_c_d_e_f_g_");
    }

    #[test]
    fn test_sanitize_truncates() {
        let name = "new_averyveryverylongentitylogicalname";
        let sanitized = sanitize_sheet_name(name);
        assert_eq!(sanitized.chars().count(), MAX_SHEET_NAME_CHARS);
        assert!(name.starts_with(&sanitized));
    }

    #[test]
    fn test_sanitize_apostrophes_and_empty() {
        assert_eq!(sanitize_sheet_name("'quoted'"), "_quoted_");
        assert_eq!(sanitize_sheet_name(""), "_");
    }

    #[test]
    fn test_sheet_namer_deduplicates_case_insensitively() {
        let mut namer = SheetNamer::with_reserved(["Summary", "Option Sets"]);
        assert_eq!(namer.assign("account"), "account");
        assert_eq!(namer.assign("ACCOUNT"), "ACCOUNT_2");
        assert_eq!(namer.assign("summary"), "summary_2");
        assert_eq!(namer.assign("account"), "account_3");
    }

    #[test]
    fn test_sheet_namer_truncated_collisions() {
        let mut namer = SheetNamer::default();
        let first = namer.assign("new_projecttaskassignment_extension_a");
        let second = namer.assign("new_projecttaskassignment_extension_b");

        assert_eq!(first, "new_projecttaskassignment_exten");
        assert_eq!(second, "new_projecttaskassignment_ext_2");
        assert!(second.chars().count() <= MAX_SHEET_NAME_CHARS);
    }
}
