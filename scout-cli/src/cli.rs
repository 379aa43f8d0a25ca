use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scout_core::models::IssueSort;
use scout_core::search::{ResultKind, SearchCriteria, SortKey};

#[derive(Debug, Parser)]
#[command(name = "scout")]
#[command(about = "Explore GitHub repositories, organizations and their open issues")]
pub struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search repositories or organizations
    Search(SearchArgs),
    /// Show a repository and its open issues
    Repo(RepoArgs),
    /// Summarize one issue and draft a prompt for a coding assistant
    Analyze(AnalyzeArgs),
    /// Read queries from stdin, one per line, and search as they settle
    Watch(WatchArgs),
    /// Print the remaining API quota
    Limits,
    /// List the built-in filter values
    Catalog(CatalogArgs),
    /// Print the settings file location
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search text. Without it, trending repositories are shown
    #[arg(default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Also load languages, label usage and fresh counts for each repository
    #[arg(long)]
    pub enrich: bool,

    #[arg(long)]
    pub json: bool,
}

/// Options shared by `search` and `watch`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Search organizations instead of repositories
    #[arg(long)]
    pub org: bool,

    /// Keep repositories written in this language (repeatable)
    #[arg(long = "lang", value_name = "LANGUAGE")]
    pub languages: Vec<String>,

    /// Keep repositories with an open issue carrying this label (repeatable)
    #[arg(long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// stars or issues
    #[arg(long, default_value_t = SortKey::Stars)]
    pub sort: SortKey,
}

impl FilterArgs {
    pub fn criteria(&self, query: &str) -> SearchCriteria {
        let kind = if self.org {
            ResultKind::Organization
        } else {
            ResultKind::Repository
        };
        SearchCriteria::new(query)
            .with_kind(kind)
            .with_sort(self.sort)
            .with_languages(&self.languages)
            .with_labels(&self.labels)
    }
}

#[derive(Debug, Args)]
pub struct RepoArgs {
    /// Repository as owner/name
    pub repository: String,

    /// Only list issues with this label
    #[arg(long)]
    pub label: Option<String>,

    /// created, updated or comments
    #[arg(long, default_value_t = IssueSort::Created)]
    pub sort: IssueSort,

    /// Print the labels used by the listed issues
    #[arg(long)]
    pub labels: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Repository as owner/name
    pub repository: String,
    pub number: u64,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    pub kind: CatalogKind,

    /// Only show entries containing this text
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CatalogKind {
    Languages,
    Labels,
}
