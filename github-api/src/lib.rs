mod client;
pub mod domain;
mod error;
mod github_url;
mod rate_limit;

pub(crate) use github_url::GitHubURL;
pub use github_url::DEFAULT_API_URL;

pub use client::*;
pub use error::*;
pub use rate_limit::*;
