//! Offline one-line summaries of issue text.

use std::sync::LazyLock;

use regex::Regex;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#+(?:[ \t].*)?$").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

const MIN_SENTENCE: usize = 20;
const MAX_SENTENCE: usize = 150;
const TRUNCATE_AT: usize = 120;

/// Reduce markdown to plain prose on a single line.
///
/// Drops fenced code blocks and header lines, keeps link text.
pub fn clean_markdown(body: &str) -> String {
    let text = CODE_FENCE.replace_all(body, " ");
    let text = HEADER_LINE.replace_all(&text, " ");
    let text = LINK.replace_all(&text, "$1");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// One-line synopsis of an issue, without any network call.
///
/// Picks the first sentence of 20 to 149 characters (ending it with a period),
/// else the first 120 characters of the cleaned body, else the body, else the
/// title.
pub fn quick_summary(title: &str, body: Option<&str>) -> String {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return title.to_string();
    };

    let cleaned = clean_markdown(body);

    let sentence = SENTENCE_END
        .split(&cleaned)
        .map(str::trim)
        .find(|s| (MIN_SENTENCE..MAX_SENTENCE).contains(&s.chars().count()));
    if let Some(sentence) = sentence {
        return if sentence.ends_with('.') {
            sentence.to_string()
        } else {
            format!("{}.", sentence)
        };
    }

    if cleaned.chars().count() > TRUNCATE_AT {
        let head: String = cleaned.chars().take(TRUNCATE_AT).collect();
        return format!("{}...", head);
    }

    if cleaned.is_empty() {
        title.to_string()
    } else {
        cleaned
    }
}
