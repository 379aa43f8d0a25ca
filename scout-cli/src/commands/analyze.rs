use anyhow::{Context as _, Result};
use scout_core::detail::parse_full_name;
use scout_core::search::RepositorySource;
use scout_core::summary::{quick_summary, GeminiGenerator, IssueAnalyzer};
use serde_json::json;

use super::Context;
use crate::cli::AnalyzeArgs;
use crate::output;

pub async fn run(ctx: &Context, args: AnalyzeArgs) -> Result<()> {
    let (owner, name) = parse_full_name(&args.repository)?;
    let issue = ctx
        .source()
        .issue(owner, name, args.number)
        .await
        .with_context(|| format!("Failed to load {}#{}", args.repository, args.number))?;

    let generator = GeminiGenerator::try_from_settings(&ctx.settings.ai).transpose()?;
    let analyzer = IssueAnalyzer::new(generator);

    let quick = quick_summary(&issue.title, issue.body.as_deref());
    let analysis = analyzer.analyze(&issue).await;

    if args.json {
        let body = json!({
            "issue": issue,
            "quickSummary": quick,
            "analysis": analysis,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        let title = format!("{}#{} {}", args.repository, issue.number, issue.title);
        output::print_analysis(&title, &quick, &analysis, analyzer.is_enabled());
    }
    Ok(())
}
