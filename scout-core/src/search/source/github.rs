//! [`RepositorySource`] over the GitHub REST API.

use async_trait::async_trait;
use github_api::domain::{Issue, IssueListParams, Label, Repository, SearchParams, User};
use github_api::GitHubClient;

use crate::models::{
    IssueLabel, IssueQuery, IssueRecord, LanguageBytes, OrgSummary, RepositorySummary,
};
use crate::search::traits::RepositorySource;
use crate::search::types::{FetchedPage, ResultKind, SearchItem, SearchRequest};
use crate::Result;

/// Source backed by a shared [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: GitHubClient,
}

impl GitHubSource {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn search(&self, request: &SearchRequest) -> Result<FetchedPage> {
        let params = SearchParams {
            q: request.q.clone(),
            sort: request.sort.to_string(),
            order: "desc".to_string(),
            page: request.page,
            per_page: request.per_page,
        };

        let page = match request.kind {
            ResultKind::Repository => {
                let response = self.client.search_repositories(&params).await?;
                FetchedPage {
                    total_count: response.total_count,
                    items: response
                        .items
                        .into_iter()
                        .map(|r| SearchItem::Repository(r.into()))
                        .collect(),
                }
            }
            ResultKind::Organization => {
                let response = self.client.search_users(&params).await?;
                FetchedPage {
                    total_count: response.total_count,
                    items: response
                        .items
                        .into_iter()
                        .map(|u| SearchItem::Organization(u.into()))
                        .collect(),
                }
            }
        };
        Ok(page)
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<RepositorySummary> {
        Ok(self.client.repository(owner, name).await?.into())
    }

    async fn languages(&self, endpoint: &str) -> Result<LanguageBytes> {
        Ok(self.client.languages(endpoint).await?)
    }

    async fn open_issues(&self, endpoint: &str, query: &IssueQuery) -> Result<Vec<IssueRecord>> {
        let params = IssueListParams {
            per_page: query.per_page,
            sort: query.sort.map(|s| s.to_string()),
            direction: Some("desc".to_string()),
            labels: query.label.clone(),
            ..Default::default()
        };
        let issues = self.client.issues(endpoint, &params).await?;
        Ok(issues.into_iter().map(IssueRecord::from).collect())
    }

    async fn issue(&self, owner: &str, name: &str, number: u64) -> Result<IssueRecord> {
        Ok(self.client.issue(owner, name, number).await?.into())
    }

    async fn labels(&self, owner: &str, name: &str) -> Result<Vec<IssueLabel>> {
        let labels = self.client.labels(owner, name).await?;
        Ok(labels.into_iter().map(IssueLabel::from).collect())
    }
}

impl From<Repository> for RepositorySummary {
    fn from(repo: Repository) -> Self {
        let issues_endpoint = repo.issues_endpoint();
        let name = repo.name;
        let owner = repo.owner.login;
        Self {
            id: repo.id,
            full_name: repo.full_name,
            owner,
            name,
            description: repo.description,
            star_count: repo.stargazers_count,
            fork_count: repo.forks_count,
            open_issue_count: repo.open_issues_count,
            primary_language: repo.language,
            languages_endpoint: repo.languages_url,
            issues_endpoint,
            html_url: repo.html_url,
            clone_url: repo.clone_url,
        }
    }
}

impl From<User> for OrgSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            html_url: user.html_url,
            avatar_url: user.avatar_url,
            account_type: user.account_type,
        }
    }
}

impl From<Label> for IssueLabel {
    fn from(label: Label) -> Self {
        Self {
            name: label.name,
            color_hex: label.color.trim_start_matches('#').to_string(),
        }
    }
}

impl From<Issue> for IssueRecord {
    fn from(issue: Issue) -> Self {
        let is_pull_request = issue.is_pull_request();
        Self {
            number: issue.number,
            title: issue.title,
            body: issue.body.filter(|b| !b.trim().is_empty()),
            labels: issue.labels.into_iter().map(IssueLabel::from).collect(),
            author: issue
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "ghost".to_string()),
            created_at: issue.created_at,
            comment_count: issue.comments,
            is_pull_request,
            state: issue.state,
            html_url: issue.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_conversion_keeps_endpoints() {
        let repo: Repository = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "tokio",
            "full_name": "tokio-rs/tokio",
            "owner": {"id": 1, "login": "tokio-rs", "type": "Organization"},
            "description": "A runtime",
            "html_url": "https://github.com/tokio-rs/tokio",
            "clone_url": "https://github.com/tokio-rs/tokio.git",
            "url": "https://api.github.com/repos/tokio-rs/tokio",
            "languages_url": "https://api.github.com/repos/tokio-rs/tokio/languages",
            "stargazers_count": 25000,
            "forks_count": 2300,
            "open_issues_count": 350,
            "language": "Rust"
        }))
        .unwrap();

        let summary = RepositorySummary::from(repo);
        assert_eq!(summary.owner, "tokio-rs");
        assert_eq!(summary.name, "tokio");
        assert_eq!(summary.open_issue_count, 350);
        assert_eq!(
            summary.issues_endpoint,
            "https://api.github.com/repos/tokio-rs/tokio/issues"
        );
        assert_eq!(summary.primary_language.as_deref(), Some("Rust"));
    }

    #[test]
    fn issue_conversion_flags_pull_requests() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "number": 12,
            "title": "Add feature",
            "body": "  ",
            "labels": [{"name": "enhancement", "color": "#a2eeef"}],
            "user": null,
            "state": "open",
            "html_url": "https://github.com/o/r/pull/12",
            "created_at": "2024-05-01T10:00:00Z",
            "comments": 2,
            "pull_request": {"url": "https://api.github.com/repos/o/r/pulls/12"}
        }))
        .unwrap();

        let record = IssueRecord::from(issue);
        assert!(record.is_pull_request);
        assert!(record.body.is_none());
        assert_eq!(record.author, "ghost");
        assert_eq!(record.labels[0].color_hex, "a2eeef");
        assert_eq!(record.comment_count, 2);
    }

    #[test]
    fn user_conversion() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 9919,
            "login": "github",
            "html_url": "https://github.com/github",
            "avatar_url": "https://avatars.githubusercontent.com/u/9919",
            "type": "Organization"
        }))
        .unwrap();

        let org = OrgSummary::from(user);
        assert_eq!(org.login, "github");
        assert_eq!(org.account_type, "Organization");
    }
}
