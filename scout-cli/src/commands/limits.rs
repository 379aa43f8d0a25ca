use anyhow::{Context as _, Result};

use super::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    let overview = ctx
        .client
        .rate_limit()
        .await
        .context("Failed to read the rate limit")?;

    println!(
        "{}",
        if ctx.client.is_authenticated() {
            "Authenticated"
        } else {
            "Anonymous (set GITHUB_TOKEN for a higher quota)"
        }
    );
    output::print_quota("core", &overview.resources.core);
    output::print_quota("search", &overview.resources.search);
    Ok(())
}
