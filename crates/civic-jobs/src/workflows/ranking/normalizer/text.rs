use std::collections::HashSet;

/// Comparison key for skills, eligibilities, and titles: case-folded with whitespace collapsed.
pub(crate) fn normalize_token(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Trimmed copy of `value`, or `None` when nothing but whitespace remains.
pub(crate) fn clean_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Drops blanks and case-insensitive duplicates, keeping the first spelling seen.
pub(crate) fn dedupe_preserving_order<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter_map(|value| clean_text(value.as_ref()))
        .filter(|value| seen.insert(normalize_token(value)))
        .collect()
}
