use anyhow::Result;
use scout_core::detail::{load_repository_detail, parse_full_name};

use super::Context;
use crate::cli::RepoArgs;
use crate::output;

pub async fn run(ctx: &Context, args: RepoArgs) -> Result<()> {
    let (owner, name) = parse_full_name(&args.repository)?;
    let detail =
        load_repository_detail(&ctx.source(), owner, name, args.label.as_deref(), args.sort)
            .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        output::print_detail(&detail, args.labels);
    }
    Ok(())
}
