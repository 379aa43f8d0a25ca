use anyhow::Result;
use scout_core::enrichment::RepositoryEnricher;
use scout_core::models::RepositorySummary;
use scout_core::search::SearchItem;
use serde_json::json;

use super::Context;
use crate::cli::SearchArgs;
use crate::output;

pub async fn run(ctx: &Context, args: SearchArgs) -> Result<()> {
    let criteria = args.filters.criteria(&args.query).with_page(args.page);
    criteria.validate()?;

    let result = ctx.pipeline().search(&criteria).await?;

    let enrichments = if args.enrich {
        let repos: Vec<RepositorySummary> = result
            .items
            .iter()
            .filter_map(SearchItem::as_repository)
            .cloned()
            .collect();
        RepositoryEnricher::new(ctx.source())
            .enrich_page(&repos)
            .await
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    if args.json {
        let body = json!({
            "criteria": criteria,
            "result": result,
            "enrichment": enrichments,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    output::print_result(&result);
    if !enrichments.is_empty() {
        println!();
        for enrichment in &enrichments {
            output::print_enrichment(enrichment);
        }
    }
    Ok(())
}
