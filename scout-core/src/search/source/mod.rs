//! Implementations of [`super::RepositorySource`].

mod github;
#[cfg(test)]
pub(crate) mod mock;

pub use github::GitHubSource;
