//! The fetch, sort, filter and present stages of a search.

use tracing::{debug, info, instrument, warn};

use super::filter::{issues_match_labels, matches_language, sort_items};
use super::pagination::PageState;
use super::traits::RepositorySource;
use super::types::{
    FetchedPage, FilterReport, PagedResult, ResultKind, SearchCriteria, SearchItem,
    SearchRequest, PAGE_SIZE, SEARCH_RESULT_CAP,
};
use crate::models::{IssueQuery, RepositorySummary};
use crate::{ExplorerError, Result};

/// Query used when no search term is given: reasonably popular repositories,
/// most recently updated first.
pub const TRENDING_QUERY: &str = "stars:>100";

/// Configuration for the search pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub page_size: u32,
    /// Results the API serves at most for one query.
    pub result_cap: u32,
    /// Open issues inspected per repository by the label filter (max 100).
    pub issue_sample: u8,
    pub trending_query: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            result_cap: SEARCH_RESULT_CAP,
            issue_sample: 100,
            trending_query: TRENDING_QUERY.to_string(),
        }
    }
}

/// Turns a [`SearchCriteria`] into a [`PagedResult`].
///
/// # Type Parameters
///
/// * `S` - RepositorySource implementation backing every call
///
/// # Examples
///
/// ```ignore
/// let pipeline = SearchPipeline::with_defaults(GitHubSource::new(client));
/// let result = pipeline.search(&SearchCriteria::new("tokio")).await?;
/// ```
pub struct SearchPipeline<S>
where
    S: RepositorySource,
{
    source: S,
    config: PipelineConfig,
}

impl<S> SearchPipeline<S>
where
    S: RepositorySource,
{
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    pub fn with_defaults(source: S) -> Self {
        Self::new(source, PipelineConfig::default())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn page_state(&self, page: u32, total_count: u64) -> PageState {
        PageState {
            current_page: page,
            total_count,
            page_size: self.config.page_size,
            result_cap: self.config.result_cap,
        }
    }

    /// Build the search call for `criteria`.
    ///
    /// Returns `None` for a blank organization query, which the user search
    /// cannot answer. Pages past the hard ceiling are rejected here, before
    /// anything is sent.
    pub fn request_for(&self, criteria: &SearchCriteria) -> Result<Option<SearchRequest>> {
        if criteria.page == 0 {
            return Err(ExplorerError::validation("Page numbers start at 1"));
        }
        let ceiling = self.page_state(criteria.page, 0).hard_ceiling();
        if criteria.page > ceiling {
            return Err(ExplorerError::validation(format!(
                "Page {} is out of range, GitHub serves at most {} pages of results",
                criteria.page, ceiling
            )));
        }

        let query = criteria.query.trim();
        let (q, sort) = match (criteria.kind, query.is_empty()) {
            (ResultKind::Repository, true) => (self.config.trending_query.clone(), "updated"),
            (ResultKind::Organization, true) => return Ok(None),
            (ResultKind::Repository, false) => (query.to_string(), criteria.sort.api_sort()),
            (ResultKind::Organization, false) => {
                (format!("{} type:org", query), criteria.sort.api_sort())
            }
        };

        Ok(Some(SearchRequest {
            kind: criteria.kind,
            q,
            sort,
            page: criteria.page,
            per_page: self.config.page_size,
        }))
    }

    /// Run every stage for `criteria`.
    ///
    /// Fetch failures are returned. Failures during filtering are not: they
    /// drop single items, and quota exhaustion ends the stage early with the
    /// matches found so far (see [`PagedResult::filter_report`]).
    #[instrument(name = "SearchPipeline::search", skip(self, criteria), fields(query = %criteria.query, kind = %criteria.kind, page = criteria.page))]
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<PagedResult> {
        let page = self.fetch(criteria).await?;
        Ok(self.refine(criteria, &page).await)
    }

    /// Fetch and locally sort the unfiltered page.
    pub async fn fetch(&self, criteria: &SearchCriteria) -> Result<FetchedPage> {
        let Some(request) = self.request_for(criteria)? else {
            debug!("Blank organization query, nothing to search");
            return Ok(FetchedPage::empty());
        };

        let mut page = self.source.search(&request).await?;
        sort_items(&mut page.items, criteria.sort);

        info!(
            q = %request.q,
            page = request.page,
            received = page.items.len(),
            total = page.total_count,
            "Fetched search page"
        );
        Ok(page)
    }

    /// Filter and present an already fetched page.
    ///
    /// Only issues the per-item filter calls, never the search call, so a
    /// change of filters can reuse a cached page.
    pub async fn refine(&self, criteria: &SearchCriteria, page: &FetchedPage) -> PagedResult {
        let (mut items, filter_report) = if criteria.filters_apply() {
            let (items, report) = self.apply_filters(criteria, &page.items).await;
            (items, Some(report))
        } else {
            (page.items.clone(), None)
        };

        sort_items(&mut items, criteria.sort);

        PagedResult {
            items,
            total_count: page.total_count,
            page_state: self.page_state(criteria.page, page.total_count),
            filter_report,
        }
    }

    /// Check items one after another, never concurrently, to keep quota use
    /// predictable.
    async fn apply_filters(
        &self,
        criteria: &SearchCriteria,
        items: &[SearchItem],
    ) -> (Vec<SearchItem>, FilterReport) {
        let mut accepted = Vec::with_capacity(items.len());
        let mut report = FilterReport::default();

        for (position, item) in items.iter().enumerate() {
            let Some(repo) = item.as_repository() else {
                accepted.push(item.clone());
                continue;
            };

            debug!(
                repo = %repo.full_name,
                call = position + 1,
                of = items.len(),
                "Checking filters"
            );
            match self.accepts(criteria, repo).await {
                Ok(true) => {
                    report.checked += 1;
                    accepted.push(item.clone());
                }
                Ok(false) => {
                    report.checked += 1;
                    report.rejected += 1;
                }
                Err(ExplorerError::RateLimitExceeded { reset_epoch }) => {
                    warn!(
                        repo = %repo.full_name,
                        checked = report.checked,
                        remaining_items = items.len() - position,
                        "Rate limit hit while filtering, keeping partial results"
                    );
                    report.stopped_by_rate_limit = Some(reset_epoch);
                    break;
                }
                Err(e) => {
                    warn!(repo = %repo.full_name, error = %e, "Dropping repository, filter call failed");
                    report.dropped_on_error += 1;
                }
            }
        }

        info!(
            checked = report.checked,
            accepted = accepted.len(),
            dropped = report.dropped_on_error,
            partial = report.is_partial(),
            "Filtered search page"
        );
        (accepted, report)
    }

    async fn accepts(&self, criteria: &SearchCriteria, repo: &RepositorySummary) -> Result<bool> {
        if !criteria.languages.is_empty() {
            let breakdown = self.source.languages(&repo.languages_endpoint).await?;
            if !matches_language(&breakdown, &criteria.languages) {
                debug!(repo = %repo.full_name, "No requested language");
                return Ok(false);
            }
        }

        if !criteria.labels.is_empty() {
            let query = IssueQuery {
                per_page: self.config.issue_sample.min(100),
                ..Default::default()
            };
            let issues = self.source.open_issues(&repo.issues_endpoint, &query).await?;
            if !issues_match_labels(&issues, &criteria.labels) {
                debug!(repo = %repo.full_name, "No open issue with a requested label");
                return Ok(false);
            }
        }

        Ok(true)
    }
}
