//! Records the explorer works with, decoupled from the GitHub wire format.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

/// Language name to byte count.
pub type LanguageBytes = BTreeMap<String, u64>;

/// A repository as found by a search, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub id: u64,
    /// `owner/name`
    pub full_name: String,
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub star_count: u64,
    pub fork_count: u64,
    pub open_issue_count: u64,
    pub primary_language: Option<String>,
    pub languages_endpoint: String,
    pub issues_endpoint: String,
    pub html_url: String,
    pub clone_url: Option<String>,
}

/// An organization account from the user search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgSummary {
    pub id: u64,
    pub login: String,
    pub html_url: String,
    pub avatar_url: Option<String>,
    pub account_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueLabel {
    pub name: String,
    /// Six hex digits, no leading `#`.
    pub color_hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<IssueLabel>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub comment_count: u64,
    /// The issues endpoint also returns pull requests.
    pub is_pull_request: bool,
    pub state: String,
    pub html_url: String,
}

impl IssueRecord {
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}

/// Drop pull requests from an issue listing.
pub fn exclude_pull_requests(issues: Vec<IssueRecord>) -> Vec<IssueRecord> {
    issues.into_iter().filter(|i| !i.is_pull_request).collect()
}

/// Sort orders offered for a repository's open issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IssueSort {
    #[default]
    Created,
    Updated,
    Comments,
}

impl IssueSort {
    pub fn description(self) -> &'static str {
        match self {
            IssueSort::Created => "Recently created",
            IssueSort::Updated => "Recently updated",
            IssueSort::Comments => "Most comments",
        }
    }
}

/// Parameters for an open-issue listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// At most 100, the API maximum for one page.
    pub per_page: u8,
    pub sort: Option<IssueSort>,
    pub label: Option<String>,
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self {
            per_page: 100,
            sort: None,
            label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(number: u64, labels: &[&str], is_pull_request: bool) -> IssueRecord {
        IssueRecord {
            number,
            title: format!("Issue {}", number),
            body: None,
            labels: labels
                .iter()
                .map(|name| IssueLabel {
                    name: name.to_string(),
                    color_hex: "ededed".to_string(),
                })
                .collect(),
            author: "octocat".to_string(),
            created_at: DateTime::from_timestamp(1706400000, 0).unwrap(),
            comment_count: 0,
            is_pull_request,
            state: "open".to_string(),
            html_url: format!("https://github.com/o/r/issues/{}", number),
        }
    }

    #[test]
    fn pull_requests_are_excluded() {
        let issues = vec![
            issue(1, &["bug"], false),
            issue(2, &[], true),
            issue(3, &["docs"], false),
            issue(4, &["bug"], true),
        ];

        let kept = exclude_pull_requests(issues);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|i| !i.is_pull_request));
        assert_eq!(kept[1].number, 3);
    }

    #[test]
    fn issue_sort_round_trips_through_strings() {
        assert_eq!(IssueSort::Comments.to_string(), "comments");
        assert_eq!("Updated".parse::<IssueSort>().unwrap(), IssueSort::Updated);
        assert!("popularity".parse::<IssueSort>().is_err());
    }
}
