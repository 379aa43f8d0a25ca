//! Matching rules of the filter stage and the in-page sort.

use std::collections::BTreeSet;

use super::types::{SearchItem, SortKey};
use crate::models::{IssueRecord, LanguageBytes};

/// Whether any requested language appears in a repository's breakdown.
///
/// Names are compared ASCII-case-insensitively ("rust" matches "Rust").
pub fn matches_language(breakdown: &LanguageBytes, wanted: &BTreeSet<String>) -> bool {
    breakdown
        .keys()
        .any(|lang| wanted.iter().any(|w| w.eq_ignore_ascii_case(lang)))
}

/// Case-insensitive containment in either direction, so "bug" matches "bugs"
/// and "good first issue" matches "good first". This also lets "ui" match "build".
pub fn label_matches(label: &str, wanted: &str) -> bool {
    let label = label.to_lowercase();
    let wanted = wanted.to_lowercase();
    label.contains(&wanted) || wanted.contains(&label)
}

/// Whether some issue carries a label matching one of the requested labels.
///
/// Pull requests never count.
pub fn issues_match_labels(issues: &[IssueRecord], wanted: &BTreeSet<String>) -> bool {
    issues
        .iter()
        .filter(|issue| !issue.is_pull_request)
        .flat_map(|issue| issue.label_names())
        .any(|name| wanted.iter().any(|w| label_matches(name, w)))
}

/// In-page ranking for [`SortKey::Issues`]: open-issue count, descending.
///
/// The search API has no "most issues" order, so this only reorders the page
/// at hand; it is not a global ranking. The sort is stable and ties keep the
/// fetch order. [`SortKey::Stars`] is served in order by the API and left alone.
pub fn sort_items(items: &mut [SearchItem], sort: SortKey) {
    if sort == SortKey::Issues {
        items.sort_by(|a, b| b.open_issue_count().cmp(&a.open_issue_count()));
    }
}
