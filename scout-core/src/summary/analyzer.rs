use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use futures::future::join_all;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::traits::TextGenerator;
use crate::models::IssueRecord;
use crate::{ExplorerError, Result};

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```(?:json)?\n?").unwrap());

const NO_SUMMARY: &str = "Unable to generate summary";
const NO_PROMPT: &str = "Unable to generate prompt";
const NO_DESCRIPTION: &str = "No description provided";

/// A one-line summary plus a prompt ready to hand to a coding assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAnalysis {
    pub summary: String,
    #[serde(rename = "aiPrompt")]
    pub ai_prompt: String,
}

#[derive(Deserialize)]
struct RawAnalysis {
    summary: Option<String>,
    #[serde(rename = "aiPrompt")]
    ai_prompt: Option<String>,
}

/// The instruction sent to the generator for one issue.
pub fn analysis_prompt(issue: &IssueRecord) -> String {
    let labels = issue.label_names().collect::<Vec<_>>().join(", ");
    format!(
        r#"Analyze this GitHub issue and provide:
1. A one-liner summary (max 100 characters) of what needs to be done
2. A crisp, detailed prompt that can be given to an AI coding assistant to help solve this issue

GitHub Issue:
Title: {title}
Body: {body}
Labels: {labels}
State: {state}

Format your response as JSON with two fields:
{{
  "summary": "one-liner summary here",
  "aiPrompt": "detailed prompt for AI assistant here"
}}"#,
        title = issue.title,
        body = body_or_placeholder(issue),
        labels = if labels.is_empty() { "None" } else { labels.as_str() },
        state = issue.state,
    )
}

/// Parse a generator reply, tolerating a surrounding code fence.
///
/// Missing or empty fields get a placeholder; anything that is not a JSON
/// object is `MalformedResponse`.
pub fn parse_analysis(text: &str) -> Result<IssueAnalysis> {
    let cleaned = JSON_FENCE.replace_all(text, "");
    let raw: RawAnalysis = serde_json::from_str(cleaned.trim())
        .map_err(|e| ExplorerError::MalformedResponse(format!("Analysis is not JSON: {}", e)))?;

    let or = |value: Option<String>, default: &str| {
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };
    Ok(IssueAnalysis {
        summary: or(raw.summary, NO_SUMMARY),
        ai_prompt: or(raw.ai_prompt, NO_PROMPT),
    })
}

/// Analysis built from the title and body alone.
pub fn fallback_analysis(issue: &IssueRecord) -> IssueAnalysis {
    IssueAnalysis {
        summary: issue.title.chars().take(100).collect(),
        ai_prompt: format!(
            "Help me solve this GitHub issue: {}\n\nDescription: {}",
            issue.title,
            body_or_placeholder(issue)
        ),
    }
}

fn body_or_placeholder(issue: &IssueRecord) -> &str {
    issue
        .body
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or(NO_DESCRIPTION)
}

/// On-demand issue analysis with a per-session cache.
///
/// Without a generator every issue gets [`fallback_analysis`].
pub struct IssueAnalyzer<G>
where
    G: TextGenerator,
{
    generator: Option<G>,
    cache: Mutex<HashMap<String, IssueAnalysis>>,
}

impl<G> IssueAnalyzer<G>
where
    G: TextGenerator,
{
    pub fn new(generator: Option<G>) -> Self {
        Self {
            generator,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Analyze one issue. Never fails; any error yields the fallback.
    pub async fn analyze(&self, issue: &IssueRecord) -> IssueAnalysis {
        if let Some(cached) = self.cached(&issue.html_url) {
            debug!(issue = %issue.html_url, "Analysis cache hit");
            return cached;
        }

        let Some(generator) = &self.generator else {
            return fallback_analysis(issue);
        };

        match self.generate(generator, issue).await {
            Ok(analysis) => {
                info!(issue = %issue.html_url, "Generated issue analysis");
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert(issue.html_url.clone(), analysis.clone());
                }
                analysis
            }
            Err(e) => {
                warn!(issue = %issue.html_url, error = %e, "Issue analysis failed, using fallback");
                fallback_analysis(issue)
            }
        }
    }

    /// Analyze several issues concurrently, in input order.
    pub async fn analyze_batch(&self, issues: &[IssueRecord]) -> Vec<IssueAnalysis> {
        join_all(issues.iter().map(|issue| self.analyze(issue))).await
    }

    async fn generate(&self, generator: &G, issue: &IssueRecord) -> Result<IssueAnalysis> {
        let text = generator.generate(&analysis_prompt(issue)).await?;
        parse_analysis(&text)
    }

    fn cached(&self, key: &str) -> Option<IssueAnalysis> {
        self.cache.lock().ok()?.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::source::mock::issue;
    use crate::summary::mock::MockGenerator;

    fn bug_report() -> IssueRecord {
        let mut record = issue(42, &["bug", "help wanted"], false);
        record.title = "Panic when config file is empty".to_string();
        record.body = Some("Steps: create an empty file and run.".to_string());
        record
    }

    #[test]
    fn prompt_lists_issue_fields() {
        let prompt = analysis_prompt(&bug_report());
        assert!(prompt.contains("Title: Panic when config file is empty"));
        assert!(prompt.contains("Labels: bug, help wanted"));
        assert!(prompt.contains("State: open"));
        assert!(prompt.contains("\"aiPrompt\""));
    }

    #[test]
    fn prompt_placeholders_for_missing_fields() {
        let prompt = analysis_prompt(&issue(1, &[], false));
        assert!(prompt.contains("Body: No description provided"));
        assert!(prompt.contains("Labels: None"));
    }

    #[test]
    fn fenced_json_is_parsed() {
        let text = "```json\n{\"summary\": \"Handle empty config\", \"aiPrompt\": \"Fix the parser\"}\n```";
        let analysis = parse_analysis(text).unwrap();
        assert_eq!(analysis.summary, "Handle empty config");
        assert_eq!(analysis.ai_prompt, "Fix the parser");
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let analysis = parse_analysis(r#"{"summary": ""}"#).unwrap();
        assert_eq!(analysis.summary, "Unable to generate summary");
        assert_eq!(analysis.ai_prompt, "Unable to generate prompt");
    }

    #[test]
    fn plain_text_is_malformed() {
        assert!(matches!(
            parse_analysis("Sure! Here is a summary of the issue."),
            Err(ExplorerError::MalformedResponse(_))
        ));
    }

    #[test]
    fn fallback_truncates_title() {
        let mut record = issue(1, &[], false);
        record.title = "x".repeat(150);
        let analysis = fallback_analysis(&record);
        assert_eq!(analysis.summary.chars().count(), 100);
        assert!(analysis
            .ai_prompt
            .ends_with("\n\nDescription: No description provided"));
    }

    #[tokio::test]
    async fn malformed_reply_resolves_to_fallback() {
        let generator = MockGenerator::returning("I could not format this as JSON, sorry.");
        let analyzer = IssueAnalyzer::new(Some(generator.clone()));
        let report = bug_report();

        let analysis = analyzer.analyze(&report).await;

        assert_eq!(analysis, fallback_analysis(&report));
        assert_eq!(
            analysis.ai_prompt,
            "Help me solve this GitHub issue: Panic when config file is empty\n\nDescription: Steps: create an empty file and run."
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn generator_errors_resolve_to_fallback() {
        let generator = MockGenerator::failing(ExplorerError::Network("timeout".into()));
        let analyzer = IssueAnalyzer::new(Some(generator));

        let report = bug_report();
        assert_eq!(analyzer.analyze(&report).await, fallback_analysis(&report));
    }

    #[tokio::test]
    async fn second_analysis_is_served_from_cache() {
        let generator =
            MockGenerator::returning(r#"{"summary": "Empty config panics", "aiPrompt": "Do it"}"#);
        let analyzer = IssueAnalyzer::new(Some(generator.clone()));
        let report = bug_report();

        let first = analyzer.analyze(&report).await;
        let second = analyzer.analyze(&report).await;

        assert_eq!(first, second);
        assert_eq!(first.summary, "Empty config panics");
        assert_eq!(generator.call_count(), 1);
        assert!(generator.last_prompt().unwrap().contains("Labels: bug, help wanted"));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let generator = MockGenerator::returning("not json");
        let analyzer = IssueAnalyzer::new(Some(generator.clone()));
        let report = bug_report();

        analyzer.analyze(&report).await;
        analyzer.analyze(&report).await;

        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn without_generator_uses_fallback() {
        let analyzer: IssueAnalyzer<MockGenerator> = IssueAnalyzer::new(None);
        assert!(!analyzer.is_enabled());

        let report = bug_report();
        assert_eq!(analyzer.analyze(&report).await, fallback_analysis(&report));
    }

    #[tokio::test]
    async fn batch_keeps_order() {
        let analyzer: IssueAnalyzer<MockGenerator> = IssueAnalyzer::new(None);
        let issues = vec![issue(1, &[], false), issue(2, &[], false)];

        let analyses = analyzer.analyze_batch(&issues).await;

        assert_eq!(analyses[0].summary, "Issue number 1");
        assert_eq!(analyses[1].summary, "Issue number 2");
    }
}
