use anyhow::{Context as _, Result};
use github_api::GitHubClient;
use scout_core::config::Settings;
use scout_core::search::source::GitHubSource;
use scout_core::search::SearchPipeline;

pub mod analyze;
pub mod catalog;
pub mod limits;
pub mod repo;
pub mod search;
pub mod watch;

/// Startup state shared by every command.
pub struct Context {
    pub settings: Settings,
    pub client: GitHubClient,
}

impl Context {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = GitHubClient::new(&settings.client_settings())
            .context("Failed to create GitHub client")?;
        if !client.is_authenticated() {
            tracing::info!("No GitHub token configured, using the anonymous quota");
        }
        Ok(Self { settings, client })
    }

    pub fn source(&self) -> GitHubSource {
        GitHubSource::new(self.client.clone())
    }

    pub fn pipeline(&self) -> SearchPipeline<GitHubSource> {
        SearchPipeline::new(self.source(), self.settings.pipeline_config())
    }
}
