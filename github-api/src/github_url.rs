/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GitHubURL(String);

impl AsRef<str> for GitHubURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl GitHubURL {
    pub fn new(base: &str) -> Self {
        Self(base.trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Resolve a request target against this base.
    ///
    /// The API hands out absolute endpoint URLs (`languages_url`, `url`, ...), those are
    /// used untouched. Anything else is treated as a path below the base URL.
    pub fn resolve(&self, target: &str) -> Self {
        if target.starts_with("http://") || target.starts_with("https://") {
            Self(target.to_string())
        } else {
            self.append_path(target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_joins_with_single_slash() {
        let url = GitHubURL::new("https://api.github.com/");
        assert_eq!(
            url.append_path("/search/repositories").as_ref(),
            "https://api.github.com/search/repositories"
        );
        assert_eq!(
            url.append_path("repos/rust-lang/rust").as_ref(),
            "https://api.github.com/repos/rust-lang/rust"
        );
    }

    #[test]
    fn resolve_keeps_absolute_endpoints() {
        let url = GitHubURL::new(DEFAULT_API_URL);
        let endpoint = "https://api.github.com/repos/tokio-rs/tokio/languages";
        assert_eq!(url.resolve(endpoint).as_ref(), endpoint);
    }

    #[test]
    fn resolve_prefixes_relative_paths() {
        let url = GitHubURL::new("http://localhost:9000");
        assert_eq!(
            url.resolve("/rate_limit").as_ref(),
            "http://localhost:9000/rate_limit"
        );
    }
}
