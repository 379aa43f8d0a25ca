//! Trait definitions for the data behind the explorer.
//!
//! The pipeline, enrichment and detail view only talk to GitHub through
//! [`RepositorySource`], so they can be tested against an in-memory source.

use async_trait::async_trait;

use super::types::{FetchedPage, SearchRequest};
use crate::models::{IssueLabel, IssueQuery, IssueRecord, LanguageBytes, RepositorySummary};
use crate::Result;

/// Read access to repositories, their languages, issues and labels.
///
/// # Example
///
/// ```ignore
/// let source = GitHubSource::new(client);
/// let languages = source.languages(&repo.languages_endpoint).await?;
/// ```
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Run one search call. The returned page is in API order.
    async fn search(&self, request: &SearchRequest) -> Result<FetchedPage>;

    /// Fresh repository metadata by owner and name.
    async fn repository(&self, owner: &str, name: &str) -> Result<RepositorySummary>;

    /// Language breakdown from a repository's languages endpoint.
    async fn languages(&self, endpoint: &str) -> Result<LanguageBytes>;

    /// One page of open issues from an issues endpoint.
    ///
    /// Pull requests are included and flagged; callers drop them.
    async fn open_issues(&self, endpoint: &str, query: &IssueQuery) -> Result<Vec<IssueRecord>>;

    async fn issue(&self, owner: &str, name: &str, number: u64) -> Result<IssueRecord>;

    /// Labels defined on a repository, up to 100.
    async fn labels(&self, owner: &str, name: &str) -> Result<Vec<IssueLabel>>;
}
