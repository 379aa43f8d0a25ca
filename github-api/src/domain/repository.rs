use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: User,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: Option<String>,
    /// API URL of the repository itself, `https://api.github.com/repos/{owner}/{repo}`.
    pub url: String,
    pub languages_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    /// Counts pull requests too, the API does not separate them here.
    #[serde(default)]
    pub open_issues_count: u64,
    pub language: Option<String>,
}

impl Repository {
    /// Listing endpoint for the repository's issues.
    ///
    /// `issues_url` in the payload is a URI template (`.../issues{/number}`), so the
    /// endpoint is derived from the repository URL instead.
    pub fn issues_endpoint(&self) -> String {
        format!("{}/issues", self.url.trim_end_matches('/'))
    }
}
