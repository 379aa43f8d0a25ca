//! Core of the repository explorer: search pipeline, enrichment and issue summaries.
//!
//! Everything here is independent of any presentation layer. The central entry point is
//! [`search::SearchPipeline::search`], an async function from [`search::SearchCriteria`]
//! to [`search::PagedResult`]:
//!
//! ```ignore
//! use scout_core::search::{SearchCriteria, SearchPipeline, SortKey};
//! use scout_core::search::source::GitHubSource;
//!
//! let pipeline = SearchPipeline::with_defaults(GitHubSource::new(client));
//! let criteria = SearchCriteria::new("async runtime")
//!     .with_sort(SortKey::Issues)
//!     .with_languages(["Rust"]);
//! let result = pipeline.search(&criteria).await?;
//! ```
//!
//! Interactive front-ends wrap the pipeline in a [`search::SearchSession`], which adds
//! debouncing and "last request wins" semantics.

pub mod config;
pub mod detail;
pub mod enrichment;
mod error;
pub mod labels;
pub mod models;
pub mod search;
pub mod summary;

pub use error::{ExplorerError, Result};
