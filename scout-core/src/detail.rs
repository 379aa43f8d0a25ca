//! Per-repository view: metadata plus its open issues.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::models::{exclude_pull_requests, IssueQuery, IssueRecord, IssueSort, RepositorySummary};
use crate::search::RepositorySource;
use crate::{ExplorerError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDetail {
    pub repository: RepositorySummary,
    /// Open issues, newest first for the chosen sort. Never contains pull requests.
    pub issues: Vec<IssueRecord>,
    pub label_filter: Option<String>,
    pub sort: IssueSort,
}

impl RepositoryDetail {
    /// Distinct labels of the listed issues, sorted case-insensitively.
    pub fn unique_labels(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .issues
            .iter()
            .flat_map(IssueRecord::label_names)
            .collect();
        let mut labels: Vec<String> = names.into_iter().map(str::to_string).collect();
        labels.sort_by_key(|l| l.to_lowercase());
        labels
    }

    /// Labels containing `needle`, ignoring case. A blank needle returns all labels.
    pub fn search_labels(&self, needle: &str) -> Vec<String> {
        let needle = needle.trim().to_lowercase();
        self.unique_labels()
            .into_iter()
            .filter(|l| needle.is_empty() || l.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn vscode_clone_link(&self) -> Option<String> {
        self.repository.clone_url.as_deref().map(vscode_clone_link)
    }
}

/// Link that makes VS Code clone a repository.
pub fn vscode_clone_link(clone_url: &str) -> String {
    format!(
        "vscode://vscode.git/clone?url={}",
        urlencoding::encode(clone_url)
    )
}

/// Split `owner/name`, rejecting anything else.
pub fn parse_full_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.trim().split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((owner, name))
        }
        _ => Err(ExplorerError::validation(format!(
            "Expected a repository as owner/name, got '{}'",
            full_name
        ))),
    }
}

/// Load a repository and up to 100 of its open issues.
///
/// Errors propagate; an unknown repository is [`ExplorerError::NotFound`].
pub async fn load_repository_detail<S>(
    source: &S,
    owner: &str,
    name: &str,
    label_filter: Option<&str>,
    sort: IssueSort,
) -> Result<RepositoryDetail>
where
    S: RepositorySource + ?Sized,
{
    let repository = source.repository(owner, name).await?;

    let label_filter = label_filter
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);
    let query = IssueQuery {
        per_page: 100,
        sort: Some(sort),
        label: label_filter.clone(),
    };
    let listed = source.open_issues(&repository.issues_endpoint, &query).await?;
    let received = listed.len();
    let issues = exclude_pull_requests(listed);

    info!(
        repo = %repository.full_name,
        received,
        issues = issues.len(),
        sort = %sort,
        label = label_filter.as_deref().unwrap_or("all"),
        "Loaded repository detail"
    );

    Ok(RepositoryDetail {
        repository,
        issues,
        label_filter,
        sort,
    })
}
