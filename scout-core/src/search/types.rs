//! Core types for the search domain.

use std::collections::BTreeSet;

use serde::Serialize;
use strum::{Display, EnumString};

use super::pagination::PageState;
use crate::models::{OrgSummary, RepositorySummary};
use crate::{ExplorerError, Result};

/// Results per search page.
pub const PAGE_SIZE: u32 = 30;

/// The search API serves at most this many results for any query.
pub const SEARCH_RESULT_CAP: u32 = 1000;

/// What a search looks for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    #[default]
    Repository,
    Organization,
}

/// Ranking requested by the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Stars,
    /// Most open issues. The API cannot sort by this, see [`super::sort_items`].
    Issues,
}

impl SortKey {
    /// Sort value understood by the search endpoint.
    pub fn api_sort(self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Issues => "updated",
        }
    }
}

/// Everything a single search depends on.
///
/// Values are never mutated in place; the `with_*` methods return a new criteria.
/// Any change other than [`SearchCriteria::with_page`] starts over at page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub query: String,
    pub kind: ResultKind,
    pub languages: BTreeSet<String>,
    pub labels: BTreeSet<String>,
    pub sort: SortKey,
    pub page: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self::new("")
    }
}

impl SearchCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: ResultKind::default(),
            languages: BTreeSet::new(),
            labels: BTreeSet::new(),
            sort: SortKey::default(),
            page: 1,
        }
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_kind(self, kind: ResultKind) -> Self {
        Self {
            kind,
            page: 1,
            ..self
        }
    }

    pub fn with_sort(self, sort: SortKey) -> Self {
        Self {
            sort,
            page: 1,
            ..self
        }
    }

    pub fn with_languages<I, T>(self, languages: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            languages: clean_set(languages),
            page: 1,
            ..self
        }
    }

    pub fn with_labels<I, T>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            labels: clean_set(labels),
            page: 1,
            ..self
        }
    }

    /// Move to another page, keeping every filter.
    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn has_filters(&self) -> bool {
        !self.languages.is_empty() || !self.labels.is_empty()
    }

    /// Whether the per-item filter stage runs for this criteria.
    pub fn filters_apply(&self) -> bool {
        self.kind == ResultKind::Repository && self.has_filters()
    }

    /// The part of the criteria that determines the unfiltered page.
    pub fn fetch_key(&self) -> FetchKey {
        FetchKey {
            query: self.query.trim().to_string(),
            kind: self.kind,
            sort: self.sort,
            page: self.page,
        }
    }

    /// Reject criteria that cannot produce a meaningful search.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(ExplorerError::validation("Page numbers start at 1"));
        }
        if self.kind == ResultKind::Organization && self.is_blank() {
            return Err(ExplorerError::validation(
                "Enter a name to search for organizations",
            ));
        }
        Ok(())
    }
}

fn clean_set<I, T>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Identity of an unfiltered search page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub query: String,
    pub kind: ResultKind,
    pub sort: SortKey,
    pub page: u32,
}

/// A concrete call to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub kind: ResultKind,
    pub q: String,
    pub sort: &'static str,
    pub page: u32,
    pub per_page: u32,
}

/// One entry of a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchItem {
    Repository(RepositorySummary),
    Organization(OrgSummary),
}

impl SearchItem {
    pub fn id(&self) -> u64 {
        match self {
            SearchItem::Repository(r) => r.id,
            SearchItem::Organization(o) => o.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SearchItem::Repository(r) => &r.full_name,
            SearchItem::Organization(o) => &o.login,
        }
    }

    pub fn open_issue_count(&self) -> u64 {
        match self {
            SearchItem::Repository(r) => r.open_issue_count,
            SearchItem::Organization(_) => 0,
        }
    }

    pub fn as_repository(&self) -> Option<&RepositorySummary> {
        match self {
            SearchItem::Repository(r) => Some(r),
            SearchItem::Organization(_) => None,
        }
    }
}

/// An unfiltered page as returned by the search endpoint, after the local sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub items: Vec<SearchItem>,
    /// Total reported by the API, before the result cap.
    pub total_count: u64,
}

impl FetchedPage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Outcome of the per-item filter stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Items whose filter calls completed, accepted or not.
    pub checked: usize,
    pub rejected: usize,
    /// Items dropped because one of their calls failed.
    pub dropped_on_error: usize,
    /// Set when the quota ran out mid-stage; holds the reset epoch.
    pub stopped_by_rate_limit: Option<i64>,
}

impl FilterReport {
    /// Whether some items were never looked at.
    pub fn is_partial(&self) -> bool {
        self.stopped_by_rate_limit.is_some()
    }
}

/// What a search hands back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedResult {
    pub items: Vec<SearchItem>,
    /// Taken from the unfiltered fetch; filtering never corrects it.
    pub total_count: u64,
    pub page_state: PageState,
    /// Present when the filter stage ran.
    pub filter_report: Option<FilterReport>,
}
