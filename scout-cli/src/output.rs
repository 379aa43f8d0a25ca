//! Plain-text rendering for terminal output.

use std::io::IsTerminal;

use github_api::{local_reset_time, QuotaWindow};
use scout_core::detail::RepositoryDetail;
use scout_core::enrichment::RepositoryEnrichment;
use scout_core::labels::{label_text_color, parse_hex_color};
use scout_core::models::{IssueLabel, OrgSummary, RepositorySummary};
use scout_core::search::{PageLink, PagedResult, SearchItem};
use scout_core::summary::{quick_summary, IssueAnalysis};

const PAGE_SPAN: u32 = 5;

pub fn print_result(result: &PagedResult) {
    let state = &result.page_state;
    println!(
        "{} results, page {} of {}",
        result.total_count,
        state.current_page,
        state.last_page().max(1)
    );
    if let Some(report) = &result.filter_report {
        println!(
            "  filtered: {} kept, {} rejected, {} dropped on errors",
            result.items.len(),
            report.rejected,
            report.dropped_on_error
        );
        if let Some(reset) = report.stopped_by_rate_limit {
            println!(
                "  partial results: rate limit reached, resets at {}",
                local_reset_time(reset)
            );
        }
    }
    println!();

    if result.items.is_empty() {
        println!("No results.");
    }
    for item in &result.items {
        match item {
            SearchItem::Repository(repo) => print_repository(repo),
            SearchItem::Organization(org) => print_organization(org),
        }
    }

    let window = page_window(result);
    if !window.is_empty() {
        println!("\n{}", window);
    }
}

fn page_window(result: &PagedResult) -> String {
    result
        .page_state
        .window(PAGE_SPAN)
        .iter()
        .map(|link| match link {
            PageLink::Page {
                number,
                current: true,
            } => format!("[{}]", number),
            PageLink::Page { number, .. } => number.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_repository(repo: &RepositorySummary) {
    println!(
        "{}  ★ {}  forks {}  open issues {}{}",
        repo.full_name,
        repo.star_count,
        repo.fork_count,
        repo.open_issue_count,
        repo.primary_language
            .as_deref()
            .map(|l| format!("  [{}]", l))
            .unwrap_or_default()
    );
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        println!("    {}", description);
    }
    println!("    {}", repo.html_url);
}

fn print_organization(org: &OrgSummary) {
    println!("{}  ({})", org.login, org.account_type);
    println!("    {}", org.html_url);
}

pub fn print_enrichment(enrichment: &RepositoryEnrichment) {
    println!("{}", enrichment.full_name);
    match &enrichment.languages {
        Some(languages) if !languages.is_empty() => {
            let shares = languages
                .iter()
                .map(|l| format!("{} {:.1}%", l.name, l.percent))
                .collect::<Vec<_>>()
                .join(", ");
            println!("    languages: {}", shares);
        }
        Some(_) => println!("    languages: none"),
        None => println!("    languages: unavailable"),
    }
    match &enrichment.labels {
        Some(labels) if !labels.is_empty() => {
            let usage = labels
                .iter()
                .map(|l| format!("{} ({})", paint(&l.name, &l.color_hex), l.count))
                .collect::<Vec<_>>()
                .join(", ");
            println!("    labels: {}", usage);
        }
        Some(_) => println!("    labels: no open issues"),
        None => println!("    labels: unavailable"),
    }
}

pub fn print_detail(detail: &RepositoryDetail, show_labels: bool) {
    print_repository(&detail.repository);
    if let Some(link) = detail.vscode_clone_link() {
        println!("    open in VS Code: {}", link);
    }
    println!(
        "\n{} open issues, {}{}",
        detail.issues.len(),
        detail.sort.description().to_lowercase(),
        detail
            .label_filter
            .as_deref()
            .map(|l| format!(", label '{}'", l))
            .unwrap_or_default()
    );

    if show_labels {
        println!("labels: {}", detail.unique_labels().join(", "));
    }
    println!();

    for issue in &detail.issues {
        let labels = render_labels(&issue.labels);
        println!(
            "#{} {}{}  ({} comments, by {})",
            issue.number,
            issue.title,
            if labels.is_empty() {
                String::new()
            } else {
                format!("  {}", labels)
            },
            issue.comment_count,
            issue.author
        );
        println!("    {}", quick_summary(&issue.title, issue.body.as_deref()));
    }
}

pub fn print_analysis(title: &str, quick: &str, analysis: &IssueAnalysis, ai_enabled: bool) {
    println!("{}\n", title);
    println!("Quick summary:\n    {}\n", quick);
    if !ai_enabled {
        println!("(no GEMINI_API_KEY configured, showing the offline fallback)\n");
    }
    println!("Summary:\n    {}\n", analysis.summary);
    println!("Prompt:\n{}", analysis.ai_prompt);
}

pub fn print_quota(name: &str, window: &QuotaWindow) {
    println!(
        "{:<7} {:>5} / {:<5} remaining, resets at {}",
        name,
        window.remaining,
        window.limit,
        local_reset_time(window.reset)
    );
}

fn render_labels(labels: &[IssueLabel]) -> String {
    labels
        .iter()
        .map(|l| paint(&l.name, &l.color_hex))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Label name on its own colour when stdout is a terminal.
fn paint(name: &str, color_hex: &str) -> String {
    if !std::io::stdout().is_terminal() {
        return format!("[{}]", name);
    }
    let Some((r, g, b)) = parse_hex_color(color_hex) else {
        return format!("[{}]", name);
    };
    let (fr, fg, fb) = parse_hex_color(label_text_color(color_hex).hex()).unwrap_or((0, 0, 0));
    format!(
        "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m {} \x1b[0m",
        r, g, b, fr, fg, fb, name
    )
}
