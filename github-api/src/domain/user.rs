use serde::{Deserialize, Serialize};

/// A user or organization account, as embedded in repositories and issues and as
/// returned by the user search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub html_url: String,
    pub avatar_url: Option<String>,
    /// "User" or "Organization".
    #[serde(rename = "type", default)]
    pub account_type: String,
}
