//! Layered settings: built-in defaults, an optional TOML file, then `SCOUT_*`
//! environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use github_api::{ClientSettings, DEFAULT_API_URL, LOW_WATER_MARK};
use serde::Deserialize;

use crate::search::{PipelineConfig, DEFAULT_QUIET, PAGE_SIZE, SEARCH_RESULT_CAP, TRENDING_QUERY};
use crate::summary::{GEMINI_API_URL, GEMINI_MODEL};

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Settings {
    pub github: GitHubSettings,
    pub search: SearchSettings,
    pub ai: AiSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GitHubSettings {
    pub api_url: String,
    #[serde(default)]
    pub token: Option<String>,
    pub user_agent: String,
    /// Remaining-request count under which a warning is logged.
    pub low_water_mark: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: "repo-scout".to_string(),
            low_water_mark: LOW_WATER_MARK,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    pub issue_sample: u8,
    pub trending_query: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_QUIET.as_millis() as u64,
            issue_sample: 100,
            trending_query: TRENDING_QUERY.to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct AiSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_MODEL.to_string(),
            api_url: GEMINI_API_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.github.api_url.clone(),
            token: self.github.token.clone(),
            user_agent: self.github.user_agent.clone(),
            low_water_mark: self.github.low_water_mark,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            page_size: PAGE_SIZE,
            result_cap: SEARCH_RESULT_CAP,
            issue_sample: self.search.issue_sample.min(100),
            trending_query: self.search.trending_query.clone(),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}

/// `<config dir>/repo-scout/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("repo-scout").join("config.toml"))
}

/// Read settings.
///
/// An explicit `path` must exist; the default file is optional. Missing
/// credentials are then taken from `GITHUB_TOKEN` and `GEMINI_API_KEY`.
pub fn read_config(path: Option<&Path>) -> Result<Settings, config::ConfigError> {
    read_config_with(
        path,
        default_config_path(),
        scout_environment(),
        |key| std::env::var(key).ok(),
    )
}

/// `SCOUT_GITHUB__TOKEN` sets `github.token`, and so on.
fn scout_environment() -> config::Environment {
    config::Environment::with_prefix("SCOUT")
        .prefix_separator("_")
        .separator("__")
}

fn read_config_with(
    explicit: Option<&Path>,
    default_path: Option<PathBuf>,
    environment: config::Environment,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, config::ConfigError> {
    let defaults = Settings::default();

    let mut builder = config::Config::builder()
        .set_default("github.api_url", defaults.github.api_url)?
        .set_default("github.user_agent", defaults.github.user_agent)?
        .set_default("github.low_water_mark", defaults.github.low_water_mark)?
        .set_default("search.debounce_ms", defaults.search.debounce_ms)?
        .set_default("search.issue_sample", u64::from(defaults.search.issue_sample))?
        .set_default("search.trending_query", defaults.search.trending_query)?
        .set_default("ai.model", defaults.ai.model)?
        .set_default("ai.api_url", defaults.ai.api_url)?;

    builder = match (explicit, default_path) {
        (Some(path), _) => builder.add_source(config::File::from(path.to_path_buf())),
        (None, Some(path)) => builder.add_source(config::File::from(path).required(false)),
        (None, None) => builder,
    };

    let settings = builder.add_source(environment).build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    fill_credentials(&mut settings, lookup);
    Ok(settings)
}

fn fill_credentials(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

    if !present(&settings.github.token) {
        settings.github.token = lookup("GITHUB_TOKEN").filter(|t| !t.trim().is_empty());
    }
    if !present(&settings.ai.api_key) {
        settings.ai.api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
    }
}
