//! In-memory source for tests.

use async_trait::async_trait;
use chrono::DateTime;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::models::{
    IssueLabel, IssueQuery, IssueRecord, LanguageBytes, OrgSummary, RepositorySummary,
};
use crate::search::traits::RepositorySource;
use crate::search::types::{FetchedPage, SearchItem, SearchRequest};
use crate::{ExplorerError, Result};

/// Repository fixture. Endpoints are derived from `full_name`.
pub fn repo(id: u64, full_name: &str, open_issues: u64) -> RepositorySummary {
    let (owner, name) = full_name.split_once('/').unwrap_or(("owner", full_name));
    let api = format!("https://api.github.com/repos/{}", full_name);
    RepositorySummary {
        id,
        full_name: full_name.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
        description: Some(format!("The {} project", name)),
        star_count: 1000 - id,
        fork_count: 10,
        open_issue_count: open_issues,
        primary_language: Some("Rust".to_string()),
        languages_endpoint: format!("{}/languages", api),
        issues_endpoint: format!("{}/issues", api),
        html_url: format!("https://github.com/{}", full_name),
        clone_url: Some(format!("https://github.com/{}.git", full_name)),
    }
}

pub fn org(id: u64, login: &str) -> OrgSummary {
    OrgSummary {
        id,
        login: login.to_string(),
        html_url: format!("https://github.com/{}", login),
        avatar_url: None,
        account_type: "Organization".to_string(),
    }
}

/// Issue fixture with label colour `ededed`.
pub fn issue(number: u64, labels: &[&str], is_pull_request: bool) -> IssueRecord {
    IssueRecord {
        number,
        title: format!("Issue number {}", number),
        body: None,
        labels: labels.iter().map(|name| label(name, "ededed")).collect(),
        author: "octocat".to_string(),
        created_at: DateTime::from_timestamp(1_706_400_000 + number as i64, 0)
            .unwrap_or_default(),
        comment_count: number,
        is_pull_request,
        state: "open".to_string(),
        html_url: format!("https://github.com/o/r/issues/{}", number),
    }
}

pub fn label(name: &str, color_hex: &str) -> IssueLabel {
    IssueLabel {
        name: name.to_string(),
        color_hex: color_hex.to_string(),
    }
}

/// Mock source backed by in-memory maps keyed by endpoint.
///
/// Unknown keys answer with `NotFound`. Every call is recorded so tests can
/// assert on request volume and order.
#[derive(Clone, Default)]
pub struct MockSource {
    pages: Arc<RwLock<HashMap<u32, Result<FetchedPage>>>>,
    repositories: Arc<RwLock<HashMap<String, Result<RepositorySummary>>>>,
    languages: Arc<RwLock<HashMap<String, Result<LanguageBytes>>>>,
    issues: Arc<RwLock<HashMap<String, Result<Vec<IssueRecord>>>>>,
    labels: Arc<RwLock<HashMap<String, Result<Vec<IssueLabel>>>>>,
    delay: Arc<RwLock<Option<Duration>>>,
    calls: Arc<RwLock<Vec<String>>>,
    search_count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `items` for the given page of any search.
    pub fn with_page(self, page: u32, items: Vec<SearchItem>, total_count: u64) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(page, Ok(FetchedPage { items, total_count }));
        self
    }

    pub fn with_search_error(self, page: u32, err: ExplorerError) -> Self {
        self.pages.write().unwrap().insert(page, Err(err));
        self
    }

    /// Make every call take `delay` before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write().unwrap() = Some(delay);
        self
    }

    pub fn with_repository(self, repo: RepositorySummary) -> Self {
        self.repositories
            .write()
            .unwrap()
            .insert(repo.full_name.clone(), Ok(repo));
        self
    }

    pub fn with_repository_error(self, full_name: &str, err: ExplorerError) -> Self {
        self.repositories
            .write()
            .unwrap()
            .insert(full_name.to_string(), Err(err));
        self
    }

    pub fn with_languages(self, repo: &RepositorySummary, languages: &[(&str, u64)]) -> Self {
        let breakdown = languages
            .iter()
            .map(|(name, bytes)| (name.to_string(), *bytes))
            .collect();
        self.languages
            .write()
            .unwrap()
            .insert(repo.languages_endpoint.clone(), Ok(breakdown));
        self
    }

    pub fn with_languages_error(self, repo: &RepositorySummary, err: ExplorerError) -> Self {
        self.languages
            .write()
            .unwrap()
            .insert(repo.languages_endpoint.clone(), Err(err));
        self
    }

    pub fn with_issues(self, repo: &RepositorySummary, issues: Vec<IssueRecord>) -> Self {
        self.issues
            .write()
            .unwrap()
            .insert(repo.issues_endpoint.clone(), Ok(issues));
        self
    }

    pub fn with_issues_error(self, repo: &RepositorySummary, err: ExplorerError) -> Self {
        self.issues
            .write()
            .unwrap()
            .insert(repo.issues_endpoint.clone(), Err(err));
        self
    }

    pub fn with_labels(self, repo: &RepositorySummary, labels: Vec<IssueLabel>) -> Self {
        self.labels
            .write()
            .unwrap()
            .insert(repo.full_name.clone(), Ok(labels));
        self
    }

    pub fn with_labels_error(self, repo: &RepositorySummary, err: ExplorerError) -> Self {
        self.labels
            .write()
            .unwrap()
            .insert(repo.full_name.clone(), Err(err));
        self
    }

    /// Number of search calls made.
    pub fn search_count(&self) -> usize {
        self.search_count.load(Ordering::SeqCst)
    }

    /// Every call made, e.g. `search q=rust page=1` or `languages <endpoint>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    async fn record(&self, call: String) {
        self.calls.write().unwrap().push(call);
        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn lookup<T: Clone>(
        map: &RwLock<HashMap<String, Result<T>>>,
        key: &str,
    ) -> Result<T> {
        map.read()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_else(|| Err(ExplorerError::NotFound(key.to_string())))
    }
}

#[async_trait]
impl RepositorySource for MockSource {
    async fn search(&self, request: &SearchRequest) -> Result<FetchedPage> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        self.record(format!(
            "search {} q={} sort={} page={}",
            request.kind, request.q, request.sort, request.page
        ))
        .await;

        self.pages
            .read()
            .unwrap()
            .get(&request.page)
            .cloned()
            .unwrap_or_else(|| Ok(FetchedPage::empty()))
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<RepositorySummary> {
        let full_name = format!("{}/{}", owner, name);
        self.record(format!("repository {}", full_name)).await;
        Self::lookup(&self.repositories, &full_name)
    }

    async fn languages(&self, endpoint: &str) -> Result<LanguageBytes> {
        self.record(format!("languages {}", endpoint)).await;
        Self::lookup(&self.languages, endpoint)
    }

    async fn open_issues(&self, endpoint: &str, query: &IssueQuery) -> Result<Vec<IssueRecord>> {
        self.record(format!("issues {}", endpoint)).await;
        let issues = Self::lookup(&self.issues, endpoint)?;
        Ok(issues
            .into_iter()
            .filter(|i| match &query.label {
                Some(wanted) => i.label_names().any(|n| n == wanted),
                None => true,
            })
            .take(usize::from(query.per_page))
            .collect())
    }

    async fn issue(&self, owner: &str, name: &str, number: u64) -> Result<IssueRecord> {
        let full_name = format!("{}/{}", owner, name);
        self.record(format!("issue {}#{}", full_name, number)).await;
        let endpoint = format!("https://api.github.com/repos/{}/issues", full_name);
        Self::lookup(&self.issues, &endpoint)?
            .into_iter()
            .find(|i| i.number == number)
            .ok_or_else(|| ExplorerError::NotFound(format!("{}#{}", full_name, number)))
    }

    async fn labels(&self, owner: &str, name: &str) -> Result<Vec<IssueLabel>> {
        let full_name = format!("{}/{}", owner, name);
        self.record(format!("labels {}", full_name)).await;
        Self::lookup(&self.labels, &full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::ResultKind;

    #[tokio::test]
    async fn unknown_keys_are_not_found() {
        let source = MockSource::new();
        assert!(matches!(
            source.languages("https://nowhere").await,
            Err(ExplorerError::NotFound(_))
        ));
        assert_eq!(source.calls(), vec!["languages https://nowhere"]);
    }

    #[tokio::test]
    async fn search_counts_calls() {
        let a = repo(1, "a/a", 0);
        let source =
            MockSource::new().with_page(1, vec![SearchItem::Repository(a.clone())], 1);

        let request = SearchRequest {
            kind: ResultKind::Repository,
            q: "a".to_string(),
            sort: "stars",
            page: 1,
            per_page: 30,
        };
        let page = source.search(&request).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(source.search_count(), 1);
        assert_eq!(
            source.calls(),
            vec!["search repository q=a sort=stars page=1"]
        );
    }
}
