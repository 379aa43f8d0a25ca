use std::collections::HashMap;

use serde::Serialize;

use crate::models::{IssueLabel, IssueRecord, LanguageBytes};

/// A language's share of a repository's code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Percent of all bytes, rounded to one decimal.
    pub percent: f64,
}

/// How many open issues carry a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelUsage {
    pub name: String,
    pub color_hex: String,
    pub count: usize,
}

/// The `top` languages by byte count.
pub fn language_shares(breakdown: &LanguageBytes, top: usize) -> Vec<LanguageShare> {
    let total: u64 = breakdown.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = breakdown
        .iter()
        .map(|(name, bytes)| LanguageShare {
            name: name.clone(),
            bytes: *bytes,
            percent: (*bytes as f64 * 1000.0 / total as f64).round() / 10.0,
        })
        .collect();
    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes));
    shares.truncate(top);
    shares
}

/// Count label usage over `issues` and keep the `top` labels used at least once.
///
/// Only labels defined on the repository are reported, in descending count;
/// ties keep the repository's label order. Pull requests are not counted.
pub fn label_histogram(
    labels: &[IssueLabel],
    issues: &[IssueRecord],
    top: usize,
) -> Vec<LabelUsage> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in issues
        .iter()
        .filter(|i| !i.is_pull_request)
        .flat_map(IssueRecord::label_names)
    {
        *counts.entry(name).or_default() += 1;
    }

    let mut usage: Vec<LabelUsage> = labels
        .iter()
        .filter_map(|label| {
            let count = counts.get(label.name.as_str()).copied().unwrap_or(0);
            (count > 0).then(|| LabelUsage {
                name: label.name.clone(),
                color_hex: label.color_hex.clone(),
                count,
            })
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage.truncate(top);
    usage
}
