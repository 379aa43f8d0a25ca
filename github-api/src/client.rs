use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    domain::{Issue, IssueListParams, Label, Repository, SearchParams, SearchResponse, User},
    local_reset_time, GitHubError, GitHubURL, RateLimitOverview, RateLimitState,
    DEFAULT_API_URL, LOW_WATER_MARK,
};

/// Immutable client configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Optional personal access token. Without it the anonymous quota applies.
    pub token: Option<String>,
    pub user_agent: String,
    pub low_water_mark: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: "repo-scout".to_string(),
            low_water_mark: LOW_WATER_MARK,
        }
    }
}

/// A decoded response together with the quota observed on it.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub rate_limit: Option<RateLimitState>,
}

/// The single choke point for outbound GitHub calls.
///
/// Cloning is cheap and clones share the last observed quota snapshot.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: GitHubURL,
    authenticated: bool,
    low_water_mark: u64,
    last_rate_limit: Arc<RwLock<Option<RateLimitState>>>,
}

impl GitHubClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|e| GitHubError::InvalidConfig(format!("user agent: {}", e)))?,
        );

        let token = settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GitHubError::InvalidConfig(format!("token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GitHubError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            base_url: GitHubURL::new(&settings.base_url),
            authenticated: token.is_some(),
            low_water_mark: settings.low_water_mark,
            last_rate_limit: Arc::new(RwLock::new(None)),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Quota seen on the most recent response, if any response carried one.
    pub fn last_rate_limit(&self) -> Option<RateLimitState> {
        self.last_rate_limit.read().ok().and_then(|guard| *guard)
    }

    /// Issue a GET against `target` (a path below the base URL or an absolute API URL).
    ///
    /// Failures are returned as-is, nothing is retried.
    pub async fn get<T: DeserializeOwned>(
        &self,
        target: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<T>, GitHubError> {
        let url = self.base_url.resolve(target);
        debug!(url = url.as_ref(), authenticated = self.authenticated, "GitHub request");

        let resp = self
            .http
            .get(url.as_ref())
            .query(params)
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let status = resp.status();
        let rate_limit = self.observe_rate_limit(resp.headers());

        if !status.is_success() {
            let headers = resp.headers().clone();
            let body = resp.text().await.unwrap_or_default();
            let err = GitHubError::from_failed_response(status, &headers, url.as_ref(), &body);
            if let GitHubError::RateLimitExceeded { reset_epoch } = &err {
                warn!(
                    url = url.as_ref(),
                    resets_at = %local_reset_time(*reset_epoch),
                    "GitHub rate limit exceeded"
                );
            }
            return Err(err);
        }

        let data = resp.json::<T>().await.map_err(|e| {
            GitHubError::Parsing(format!("Failed to parse response as JSON: {}", e))
        })?;

        Ok(ApiResponse { data, rate_limit })
    }

    fn observe_rate_limit(&self, headers: &HeaderMap) -> Option<RateLimitState> {
        let state = RateLimitState::from_headers(headers)?;

        debug!(
            remaining = state.remaining,
            limit = state.limit,
            resets_at = %local_reset_time(state.reset_epoch),
            "Rate limit"
        );
        if state.is_low(self.low_water_mark) {
            warn!(
                remaining = state.remaining,
                limit = state.limit,
                "Low on GitHub API requests"
            );
        }

        if let Ok(mut guard) = self.last_rate_limit.write() {
            *guard = Some(state);
        }
        Some(state)
    }

    pub async fn search_repositories(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResponse<Repository>, GitHubError> {
        let response: ApiResponse<SearchResponse<Repository>> = self
            .get("/search/repositories", &params.to_query())
            .await?;
        info!(
            q = %params.q,
            page = params.page,
            received = response.data.items.len(),
            total = response.data.total_count,
            "Repository search"
        );
        Ok(response.data)
    }

    /// Search accounts. Organization searches put `type:org` into `params.q`.
    pub async fn search_users(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResponse<User>, GitHubError> {
        let response: ApiResponse<SearchResponse<User>> =
            self.get("/search/users", &params.to_query()).await?;
        info!(
            q = %params.q,
            page = params.page,
            received = response.data.items.len(),
            total = response.data.total_count,
            "User search"
        );
        Ok(response.data)
    }

    pub async fn repository(&self, owner: &str, repo: &str) -> Result<Repository, GitHubError> {
        let path = format!("/repos/{}/{}", owner, repo);
        Ok(self.get(&path, &[]).await?.data)
    }

    /// Language name to byte count, as served by a repository's `languages_url`.
    pub async fn languages(&self, endpoint: &str) -> Result<BTreeMap<String, u64>, GitHubError> {
        Ok(self.get(endpoint, &[]).await?.data)
    }

    /// List issues from an issues endpoint. The result still contains pull requests.
    pub async fn issues(
        &self,
        endpoint: &str,
        params: &IssueListParams,
    ) -> Result<Vec<Issue>, GitHubError> {
        Ok(self.get(endpoint, &params.to_query()).await?.data)
    }

    pub async fn issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue, GitHubError> {
        let path = format!("/repos/{}/{}/issues/{}", owner, repo, number);
        Ok(self.get(&path, &[]).await?.data)
    }

    pub async fn labels(&self, owner: &str, repo: &str) -> Result<Vec<Label>, GitHubError> {
        let path = format!("/repos/{}/{}/labels", owner, repo);
        Ok(self
            .get(&path, &[("per_page", "100".to_string())])
            .await?
            .data)
    }

    pub async fn rate_limit(&self) -> Result<RateLimitOverview, GitHubError> {
        Ok(self.get("/rate_limit", &[]).await?.data)
    }
}
