//! Repository and organization search.
//!
//! A search runs in four stages, each a suspension point:
//!
//! 1. **Fetch** one page from the search API (blank repository queries fall back
//!    to a trending query, blank organization queries return nothing).
//! 2. **Sort** the page locally when ranking by open issues.
//! 3. **Filter** repositories by language and issue label, one item at a time.
//! 4. **Present** the surviving items, sorted again, with the unfiltered total.
//!
//! # Architecture
//!
//! - [`RepositorySource`] - Data access (GitHub, mocks)
//! - [`SearchPipeline`] - The stages above as plain async functions
//! - [`SearchSession`] - Debounced, last-wins driver for interactive input
//!
//! # Example
//!
//! ```ignore
//! use scout_core::search::{SearchCriteria, SearchPipeline, SortKey};
//!
//! let pipeline = SearchPipeline::with_defaults(GitHubSource::new(client));
//! let criteria = SearchCriteria::new("http client")
//!     .with_sort(SortKey::Issues)
//!     .with_labels(["good first issue"]);
//! let result = pipeline.search(&criteria).await?;
//! ```

mod debounce;
mod filter;
mod pagination;
mod pipeline;
mod session;
mod traits;
mod types;

pub mod source;

pub use debounce::{Debouncer, RequestTokens, DEFAULT_QUIET};
pub use filter::{issues_match_labels, label_matches, matches_language, sort_items};
pub use pagination::{PageLink, PageState};
pub use pipeline::{PipelineConfig, SearchPipeline, TRENDING_QUERY};
pub use session::SearchSession;
pub use traits::RepositorySource;
pub use types::{
    FetchKey, FetchedPage, FilterReport, PagedResult, ResultKind, SearchCriteria, SearchItem,
    SearchRequest, SortKey, PAGE_SIZE, SEARCH_RESULT_CAP,
};
