use std::sync::Arc;

use anyhow::Result;
use scout_core::search::{Debouncer, PagedResult, SearchSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::warn;

use super::Context;
use crate::cli::WatchArgs;
use crate::output;

/// One line of watch input.
#[derive(Debug, PartialEq, Eq)]
enum WatchInput {
    Query(String),
    Page(u32),
}

fn parse_line(line: &str) -> Option<WatchInput> {
    let line = line.trim();
    match line.strip_prefix(":page") {
        Some(rest) => rest.trim().parse().ok().map(WatchInput::Page),
        None => Some(WatchInput::Query(line.to_string())),
    }
}

/// Lines are searched once they stop changing for the quiet window; an older
/// search still running when a newer one settles is never printed.
/// `:page N` moves the last search to page N right away.
pub async fn run(ctx: &Context, args: WatchArgs) -> Result<()> {
    let session = Arc::new(SearchSession::new(
        ctx.pipeline(),
        Debouncer::new(ctx.settings.debounce()),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let Some(input) = parse_line(&line) else {
            eprintln!("usage: :page N");
            continue;
        };

        let session = Arc::clone(&session);
        match input {
            WatchInput::Query(query) => {
                let criteria = args.filters.criteria(&query);
                tasks.spawn(async move { session.submit(criteria).await });
            }
            WatchInput::Page(page) => {
                tasks.spawn(async move { session.go_to_page(page).await });
            }
        }

        // Print whatever settled while we were waiting for input.
        while let Some(joined) = tasks.try_join_next() {
            report(joined?);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        report(joined?);
    }
    Ok(())
}

fn report(outcome: scout_core::Result<Option<PagedResult>>) {
    match outcome {
        Ok(Some(result)) => {
            output::print_result(&result);
            println!();
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "Search failed");
            eprintln!("{}", e);
        }
    }
}
