use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Label, User};

/// An entry of the issues endpoint. Pull requests are returned here as well and are
/// recognised by the `pull_request` marker object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub user: Option<User>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: u64,
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Query parameters of the issues listing.
#[derive(Debug, Clone)]
pub struct IssueListParams {
    pub state: String,
    pub per_page: u8,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub labels: Option<String>,
}

impl Default for IssueListParams {
    fn default() -> Self {
        Self {
            state: "open".to_string(),
            per_page: 100,
            sort: None,
            direction: None,
            labels: None,
        }
    }
}

impl IssueListParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("state", self.state.clone()),
            ("per_page", self.per_page.min(100).to_string()),
        ];
        if let Some(sort) = &self.sort {
            query.push(("sort", sort.clone()));
        }
        if let Some(direction) = &self.direction {
            query.push(("direction", direction.clone()));
        }
        if let Some(labels) = &self.labels {
            query.push(("labels", labels.clone()));
        }
        query
    }
}
