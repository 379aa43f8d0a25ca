//! Interactive search state: debouncing, last-wins, cached pages and paging.

use std::sync::Mutex;

use tracing::debug;

use super::debounce::Debouncer;
use super::pagination::PageState;
use super::pipeline::SearchPipeline;
use super::traits::RepositorySource;
use super::types::{FetchKey, FetchedPage, PagedResult, SearchCriteria};
use crate::{ExplorerError, Result};

#[derive(Debug, Default)]
struct SessionState {
    criteria: Option<SearchCriteria>,
    page_state: Option<PageState>,
    /// Last unfiltered page, so filter changes do not repeat the search call.
    cached: Option<(FetchKey, FetchedPage)>,
}

/// A search pipeline driven by a stream of user edits.
///
/// Every call returns `Ok(None)` when a newer call superseded it; only the
/// latest result updates the session.
pub struct SearchSession<S>
where
    S: RepositorySource,
{
    pipeline: SearchPipeline<S>,
    debouncer: Debouncer,
    state: Mutex<SessionState>,
}

impl<S> SearchSession<S>
where
    S: RepositorySource,
{
    pub fn new(pipeline: SearchPipeline<S>, debouncer: Debouncer) -> Self {
        Self {
            pipeline,
            debouncer,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn pipeline(&self) -> &SearchPipeline<S> {
        &self.pipeline
    }

    /// Criteria of the last applied result.
    pub fn criteria(&self) -> Option<SearchCriteria> {
        self.lock().criteria.clone()
    }

    /// Paging position of the last applied result.
    pub fn page_state(&self) -> Option<PageState> {
        self.lock().page_state
    }

    /// Search after the quiet window, for input that arrives while typing.
    pub async fn submit(&self, criteria: SearchCriteria) -> Result<Option<PagedResult>> {
        let outcome = self.debouncer.run(|| self.execute(&criteria)).await;
        self.apply(criteria, outcome)
    }

    /// Search immediately, reusing the cached unfiltered page when only the
    /// filters changed.
    pub async fn refilter(&self, criteria: SearchCriteria) -> Result<Option<PagedResult>> {
        let outcome = self
            .debouncer
            .tokens()
            .run_latest(self.execute(&criteria))
            .await;
        self.apply(criteria, outcome)
    }

    /// Move the last search to another page.
    ///
    /// Pages beyond the last reachable one are rejected without calling the API.
    pub async fn go_to_page(&self, page: u32) -> Result<Option<PagedResult>> {
        let (criteria, page_state) = {
            let state = self.lock();
            match (&state.criteria, state.page_state) {
                (Some(criteria), Some(page_state)) => (criteria.clone(), page_state),
                _ => return Err(ExplorerError::validation("No search to page through yet")),
            }
        };

        page_state.check(page)?;
        self.refilter(criteria.with_page(page)).await
    }

    async fn execute(&self, criteria: &SearchCriteria) -> Result<(FetchedPage, PagedResult)> {
        let key = criteria.fetch_key();
        let cached = {
            let state = self.lock();
            state
                .cached
                .as_ref()
                .filter(|(cached_key, _)| *cached_key == key)
                .map(|(_, page)| page.clone())
        };

        let page = match cached {
            Some(page) => {
                debug!(query = %key.query, page = key.page, "Reusing cached search page");
                page
            }
            None => self.pipeline.fetch(criteria).await?,
        };
        let result = self.pipeline.refine(criteria, &page).await;
        Ok((page, result))
    }

    fn apply(
        &self,
        criteria: SearchCriteria,
        outcome: Option<Result<(FetchedPage, PagedResult)>>,
    ) -> Result<Option<PagedResult>> {
        let Some(outcome) = outcome else {
            return Ok(None);
        };
        let (page, result) = outcome?;

        let mut state = self.lock();
        state.cached = Some((criteria.fetch_key(), page));
        state.page_state = Some(result.page_state);
        state.criteria = Some(criteria);
        Ok(Some(result))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // State is replaced wholesale, a poisoned guard still holds a consistent value.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
