mod cli;
mod commands;
mod output;

use std::path::Path;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::{Cli, Commands};
use commands::Context;
use scout_core::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("scout_core=info,github_api=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Search(args) => commands::search::run(&load_context(config_path)?, args).await,
        Commands::Repo(args) => commands::repo::run(&load_context(config_path)?, args).await,
        Commands::Analyze(args) => commands::analyze::run(&load_context(config_path)?, args).await,
        Commands::Watch(args) => commands::watch::run(&load_context(config_path)?, args).await,
        Commands::Limits => commands::limits::run(&load_context(config_path)?).await,
        Commands::Catalog(args) => {
            commands::catalog::run(args);
            Ok(())
        }
        Commands::ConfigPath => {
            match config_path
                .map(Path::to_path_buf)
                .or_else(config::default_config_path)
            {
                Some(path) => println!("{}", path.display()),
                None => println!("No config directory on this platform"),
            }
            Ok(())
        }
    }
}

fn load_context(config_path: Option<&Path>) -> Result<Context> {
    let settings = config::read_config(config_path).context("Failed to read settings")?;
    Context::new(settings)
}
