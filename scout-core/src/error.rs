use github_api::{local_reset_time, GitHubError};

/// Errors surfaced by the explorer core.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExplorerError {
    #[error(
        "GitHub API rate limit exceeded. Resets at {}. Please wait or add a GitHub personal access token.",
        reset_clock(.reset_epoch)
    )]
    RateLimitExceeded { reset_epoch: i64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Validation(String),
}

fn reset_clock(reset_epoch: &i64) -> String {
    local_reset_time(*reset_epoch)
}

impl ExplorerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ExplorerError::RateLimitExceeded { .. })
    }

    pub fn reset_epoch(&self) -> Option<i64> {
        match self {
            ExplorerError::RateLimitExceeded { reset_epoch } => Some(*reset_epoch),
            _ => None,
        }
    }
}

impl From<GitHubError> for ExplorerError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::RateLimitExceeded { reset_epoch } => {
                ExplorerError::RateLimitExceeded { reset_epoch }
            }
            GitHubError::NotFound(url) => ExplorerError::NotFound(url),
            GitHubError::Network(msg) => ExplorerError::Network(msg),
            // 422 is GitHub rejecting the query itself, e.g. paging past the first 1000 results
            GitHubError::Status { status: 422, message } => ExplorerError::Validation(message),
            GitHubError::Status { status, message } => {
                ExplorerError::Network(format!("GitHub returned {}: {}", status, message))
            }
            GitHubError::Parsing(msg) => ExplorerError::MalformedResponse(msg),
            GitHubError::InvalidConfig(msg) => ExplorerError::Validation(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
