use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use super::stats::{label_histogram, language_shares, LabelUsage, LanguageShare};
use crate::models::{exclude_pull_requests, IssueQuery, RepositorySummary};
use crate::search::{RepositorySource, RequestTokens};
use crate::Result;

/// Languages shown per repository.
pub const TOP_LANGUAGES: usize = 5;

/// Labels shown per repository.
pub const TOP_LABELS: usize = 8;

/// Extra data fetched for a displayed repository.
///
/// Each field is filled independently; `None` means that part could not be
/// loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryEnrichment {
    pub full_name: String,
    /// Refreshed metadata (stars, forks, open issues).
    pub detail: Option<RepositorySummary>,
    pub languages: Option<Vec<LanguageShare>>,
    /// Empty without any open issues.
    pub labels: Option<Vec<LabelUsage>>,
}

/// Best-effort enrichment of search results.
pub struct RepositoryEnricher<S>
where
    S: RepositorySource,
{
    source: S,
    tokens: RequestTokens,
}

impl<S> RepositoryEnricher<S>
where
    S: RepositorySource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            tokens: RequestTokens::new(),
        }
    }

    /// Enrich one repository. Never fails: every part that errors is logged and
    /// left empty.
    pub async fn enrich(&self, repo: &RepositorySummary) -> RepositoryEnrichment {
        let (detail, languages, labels) = tokio::join!(
            self.source.repository(&repo.owner, &repo.name),
            self.source.languages(&repo.languages_endpoint),
            self.label_usage(repo),
        );

        RepositoryEnrichment {
            full_name: repo.full_name.clone(),
            detail: keep("detail", repo, detail),
            languages: keep("languages", repo, languages)
                .map(|breakdown| language_shares(&breakdown, TOP_LANGUAGES)),
            labels: keep("labels", repo, labels),
        }
    }

    /// Enrich a page of repositories concurrently.
    ///
    /// Returns `None` if another batch was started before this one finished,
    /// so a replaced page never receives stale data.
    pub async fn enrich_page(&self, repos: &[RepositorySummary]) -> Option<Vec<RepositoryEnrichment>> {
        self.tokens
            .run_latest(join_all(repos.iter().map(|repo| self.enrich(repo))))
            .await
    }

    async fn label_usage(&self, repo: &RepositorySummary) -> Result<Vec<LabelUsage>> {
        if repo.open_issue_count == 0 {
            debug!(repo = %repo.full_name, "No open issues, skipping labels");
            return Ok(Vec::new());
        }

        let query = IssueQuery::default();
        let (labels, issues) = tokio::join!(
            self.source.labels(&repo.owner, &repo.name),
            self.source.open_issues(&repo.issues_endpoint, &query),
        );
        let issues = exclude_pull_requests(issues?);
        Ok(label_histogram(&labels?, &issues, TOP_LABELS))
    }
}

fn keep<T>(part: &str, repo: &RepositorySummary, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(repo = %repo.full_name, part, error = %e, "Enrichment failed");
            None
        }
    }
}
