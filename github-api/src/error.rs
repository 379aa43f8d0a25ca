use reqwest::{header::HeaderMap, StatusCode};
use thiserror::Error;

use crate::{local_reset_time, reset_epoch_from_headers};

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub API rate limit exceeded, resets at {}", reset_clock(.reset_epoch))]
    RateLimitExceeded { reset_epoch: i64 },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("NetworkError: {0}")]
    Network(String),
    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("ParsingError: {0}")]
    Parsing(String),
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl GitHubError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GitHubError::RateLimitExceeded { .. })
    }

    /// Classify a non-success response.
    ///
    /// A 403 (or 429) that carries `x-ratelimit-reset` is quota exhaustion, anything else
    /// keeps its status so callers can tell permission problems apart.
    pub(crate) fn from_failed_response(
        status: StatusCode,
        headers: &HeaderMap,
        url: &str,
        body: &str,
    ) -> Self {
        if matches!(
            status,
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
        ) {
            if let Some(reset_epoch) = reset_epoch_from_headers(headers) {
                return GitHubError::RateLimitExceeded { reset_epoch };
            }
        }

        if status == StatusCode::NOT_FOUND {
            return GitHubError::NotFound(url.to_string());
        }

        GitHubError::Status {
            status: status.as_u16(),
            message: api_message(body),
        }
    }
}

fn reset_clock(reset_epoch: &i64) -> String {
    local_reset_time(*reset_epoch)
}

/// GitHub error bodies look like `{"message": "...", "documentation_url": "..."}`.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn reset_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1706400000"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers
    }

    #[test]
    fn forbidden_with_reset_header_is_rate_limit() {
        let err = GitHubError::from_failed_response(
            StatusCode::FORBIDDEN,
            &reset_headers(),
            "https://api.github.com/search/repositories",
            r#"{"message": "API rate limit exceeded"}"#,
        );

        assert!(err.is_rate_limited());
        assert!(matches!(
            err,
            GitHubError::RateLimitExceeded {
                reset_epoch: 1706400000
            }
        ));
    }

    #[test]
    fn forbidden_without_reset_header_keeps_status() {
        let err = GitHubError::from_failed_response(
            StatusCode::FORBIDDEN,
            &HeaderMap::new(),
            "https://api.github.com/repos/a/b",
            r#"{"message": "Resource not accessible by integration"}"#,
        );

        match err {
            GitHubError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Resource not accessible by integration");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn not_found_carries_url() {
        let err = GitHubError::from_failed_response(
            StatusCode::NOT_FOUND,
            &reset_headers(),
            "https://api.github.com/repos/nobody/nothing",
            "",
        );
        assert!(matches!(err, GitHubError::NotFound(url) if url.ends_with("nobody/nothing")));
    }

    #[test]
    fn plain_text_body_is_used_as_message() {
        let err = GitHubError::from_failed_response(
            StatusCode::BAD_GATEWAY,
            &HeaderMap::new(),
            "https://api.github.com/search/users",
            "  upstream unavailable \n",
        );
        assert!(matches!(err, GitHubError::Status { status: 502, message } if message == "upstream unavailable"));
    }
}
